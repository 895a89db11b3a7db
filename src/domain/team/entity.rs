//! Team entity and related types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TeamId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Field names owned by the entity itself, never carried as attributes
const RESERVED_FIELDS: [&str; 2] = ["id", "country"];

/// Team entity
///
/// Only `country` is mutable. Any other fields supplied at creation are
/// carried opaquely and echoed back flattened next to `id` and `country`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    country: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Team {
    pub fn new(id: TeamId, new_team: NewTeam) -> Self {
        Self {
            id,
            country: new_team.country,
            attributes: new_team.attributes,
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }
}

/// Team payload before the store assigns an identifier
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTeam {
    #[serde(alias = "Country")]
    country: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl NewTeam {
    pub fn new(country: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            country: country.into(),
            attributes,
        }
        .without_reserved_fields()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Drop client-supplied values for fields the store owns, such as `id`
    pub fn without_reserved_fields(mut self) -> Self {
        self.attributes.retain(|key, _| {
            !RESERVED_FIELDS
                .iter()
                .any(|reserved| key.eq_ignore_ascii_case(reserved))
        });
        self
    }
}
