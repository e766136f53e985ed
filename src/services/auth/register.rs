use tracing::info;

use super::AuthService;
use crate::errors::{Result, StudioError};
use crate::models::auth::RegisterRequest;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    require_non_blank, validate_email, validate_password, validate_username,
};

pub async fn handle_register(service: &AuthService, req: RegisterRequest) -> Result<User> {
    validate_register(&req)?;

    // 用户名唯一；并发插入由唯一索引兜底
    if service
        .storage()
        .get_user_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(StudioError::user_already_exists("Username already exists"));
    }

    let password_hash = hash_password(&req.password, &service.config().argon2)?;

    let user = service
        .storage()
        .create_user(CreateUserRequest {
            username: req.username,
            password: password_hash,
            nickname: req.nickname,
            real_name: req.real_name,
            college: req.college,
            student_id: req.student_id,
            qq: req.qq.filter(|s| !s.trim().is_empty()),
            email: req.email.filter(|s| !s.trim().is_empty()),
            is_admin: false,
        })
        .await?;

    info!("User registered: {} (id {})", user.username, user.id);
    Ok(user)
}

fn validate_register(req: &RegisterRequest) -> Result<()> {
    validate_username(&req.username).map_err(StudioError::invalid_params)?;
    validate_password(&req.password).map_err(StudioError::invalid_params)?;

    if let Some(email) = req.email.as_deref()
        && !email.trim().is_empty()
    {
        validate_email(email).map_err(StudioError::invalid_params)?;
    }

    require_non_blank("nickname", &req.nickname)?;
    require_non_blank("real_name", &req.real_name)?;
    require_non_blank("college", &req.college)?;
    require_non_blank("student_id", &req.student_id)?;
    Ok(())
}
