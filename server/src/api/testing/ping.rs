use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub ok: bool,
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Server is up", body = PingResponse)
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(PingResponse { ok: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::into_parts;

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = into_parts(ping().await).await;
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::json!({"ok": true}));
    }
}
