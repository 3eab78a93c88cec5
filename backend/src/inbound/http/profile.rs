//! Profile generation HTTP handler.
//!
//! ```text
//! POST /api/profile {"username":"u/spez"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// Request payload naming the account to profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    /// Reddit handle; `u/` and `/u/` prefixes are accepted.
    #[schema(example = "u/spez")]
    pub username: Option<String>,
}

/// Generated personality summary.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: String,
}

/// Generate a personality profile from a user's recent public comments.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile generated", body = ProfileResponse),
        (status = 400, description = "Missing or invalid username", body = ErrorResponse),
        (status = 401, description = "Reddit authentication failed", body = ErrorResponse),
        (status = 404, description = "Unknown user or no public comments", body = ErrorResponse),
        (status = 500, description = "Upstream or completion failure", body = ErrorResponse)
    ),
    tags = ["profile"],
    operation_id = "createProfile"
)]
#[post("/profile")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let username = payload.into_inner().username.unwrap_or_default();
    let profile = state.profiles.generate_profile(&username).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile: profile.into_inner(),
    }))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
