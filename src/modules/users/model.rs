use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The caller as seen through their access token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Issue time of the presented access token, seconds since the Unix epoch.
    pub logged_in_at: Option<i64>,
}
