use tracing::info;

use super::UserService;
use crate::errors::{Result, StudioError};
use crate::models::users::{entities::User, requests::UpdateUserRequest};
use crate::utils::validate::validate_email;

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update: UpdateUserRequest,
) -> Result<User> {
    // 空字符串视为未提供，不做格式校验
    if let Some(email) = update.email.as_deref()
        && !email.trim().is_empty()
    {
        validate_email(email).map_err(StudioError::invalid_params)?;
    }

    let user = service
        .storage()
        .update_user(user_id, update)
        .await?
        .ok_or_else(|| StudioError::user_not_found("User not found"))?;

    info!("User {} updated", user.id);
    Ok(user)
}
