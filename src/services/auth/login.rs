use tracing::info;

use super::AuthService;
use crate::errors::{Result, StudioError};
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

pub async fn handle_login(service: &AuthService, req: LoginRequest) -> Result<LoginResponse> {
    let user = service
        .storage()
        .get_user_by_username(&req.username)
        .await?
        .ok_or_else(|| StudioError::user_not_found("User not found"))?;

    if !verify_password(&req.password, &user.password_hash) {
        info!("Login failed for user {}: wrong password", user.username);
        return Err(StudioError::invalid_credential("Invalid username or password"));
    }

    let token = service
        .jwt()
        .generate_token(&user)
        .map_err(|e| StudioError::token(format!("Failed to generate token: {e}")))?;

    info!("User {} logged in", user.username);
    Ok(LoginResponse {
        token,
        expires_in: service.jwt().expires_in(),
        user,
    })
}
