//! Team API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{NewTeam, Team, TeamId};

/// Create the team router
pub fn create_team_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_teams)
                .post(create_team)
                .patch(update_team)
                .delete(delete_team),
        )
        .route("/{id}", get(get_team))
}

/// Query parameters for patch and delete
///
/// Values are kept as raw strings so an unparseable id yields "Invalid Id"
/// rather than a query rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Country")]
    pub country: Option<String>,
}

fn parse_id(raw: Option<&str>) -> Result<TeamId, ApiError> {
    raw.and_then(|id| id.parse().ok()).ok_or(ApiError::InvalidId)
}

/// List all teams
///
/// GET /api/Team
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = state.team_service.list().await?;
    Ok(Json(teams))
}

/// Get a team by ID
///
/// GET /api/Team/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    let id = parse_id(Some(&id))?;
    let team = state.team_service.get(id).await?;
    Ok(Json(team))
}

/// Create a new team
///
/// POST /api/Team
pub async fn create_team(
    State(state): State<AppState>,
    Json(team): Json<NewTeam>,
) -> Result<Response, ApiError> {
    let team = state.team_service.create(team).await?;
    let location = format!("/api/Team/{}", team.id());

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(team)).into_response())
}

/// Overwrite the country of a team
///
/// PATCH /api/Team?id={id}&country={country}
pub async fn update_team(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(query.id.as_deref())?;
    let country = query.country.ok_or(ApiError::missing_param("country"))?;

    state.team_service.update_country(id, &country).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a team
///
/// DELETE /api/Team?id={id}
pub async fn delete_team(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(query.id.as_deref())?;

    state.team_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
