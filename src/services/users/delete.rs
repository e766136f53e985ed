use tracing::info;

use super::UserService;
use crate::errors::{Result, StudioError};

pub async fn delete_user(service: &UserService, user_id: i64, current_user_id: i64) -> Result<()> {
    // 禁止删除当前登录用户
    if user_id == current_user_id {
        return Err(StudioError::invalid_params("Cannot delete current user"));
    }

    if !service.storage().delete_user(user_id).await? {
        return Err(StudioError::user_not_found("User not found"));
    }

    info!("User {} deleted by {}", user_id, current_user_id);
    Ok(())
}
