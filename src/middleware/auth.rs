use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{client::ApiClient, error::AppError, middleware::session::SessionId, state::AppState};

/// A session that has logged in through the admin console. Carries an API client
/// already authorized with the session's bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session_id: Uuid,
    pub api: ApiClient,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(session_id) = SessionId::from_request_parts(parts, state).await?;

        let token = state
            .sessions
            .read(session_id, |session| session.token.clone())
            .await
            .ok_or(AppError::Unauthorized)?;

        Ok(AdminSession {
            session_id,
            api: state.api_with(Some(token)),
        })
    }
}
