use chrono::{Duration, Utc};
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};
use crate::error::ApiError;
use crate::store::UserStore;

/// Create a session for `user_id` and return the bearer token handed to the client.
pub async fn issue_session(
    store: &dyn UserStore,
    user_id: Uuid,
    ttl: Duration,
) -> Result<String, ApiError> {
    let token = generate_token().map_err(|e| {
        tracing::error!("Failed to generate session token: {}", e);
        ApiError::Internal("Failed to create session")
    })?;

    store
        .create_session(user_id, &hash_token(&token), Utc::now() + ttl)
        .await?;

    Ok(token)
}
