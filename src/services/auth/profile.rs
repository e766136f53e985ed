use super::AuthService;
use crate::errors::{Result, StudioError};
use crate::models::users::entities::User;

pub async fn handle_profile(service: &AuthService, user_id: i64) -> Result<User> {
    service
        .storage()
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| StudioError::user_not_found("User not found"))
}
