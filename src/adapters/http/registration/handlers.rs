//! HTTP handlers for tournament registration.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::registration::RegisterForEventCommand;
use crate::domain::foundation::TournamentId;

use super::dto::{RegisterRequest, RegistrationResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::AuthenticatedUser;
use crate::adapters::http::state::AppState;

/// POST /api/tournaments/:tournament_id/registrations - Register with a pass
pub async fn register_for_tournament(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(tournament_id): Path<String>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterForEventCommand {
        user_id: user.user_id,
        tournament_id: TournamentId::parse(tournament_id.trim())?,
        pass_id: request.pass_id()?,
    };

    let result = state.register_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse::from(result))))
}
