use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::StudioError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 128;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 50
    let len = username.chars().count();
    if !(3..=50).contains(&len) {
        return Err("Username length must be between 3 and 50 characters");
    }
    // 不允许空白与控制字符
    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err("Username must not contain whitespace or control characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err("Password must be at least 6 characters long");
    }
    if len > PASSWORD_MAX_LEN {
        return Err("Password must be at most 128 characters long");
    }
    Ok(())
}

/// 必填文本字段不能为空白
pub fn require_non_blank(field: &str, value: &str) -> Result<(), StudioError> {
    if value.trim().is_empty() {
        return Err(StudioError::invalid_params(format!("{field} is required")));
    }
    Ok(())
}
