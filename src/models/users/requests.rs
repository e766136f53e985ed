use serde::Deserialize;

// 用户创建请求（存储层使用，password 为哈希后的值）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub real_name: String,
    pub college: String,
    pub student_id: String,
    pub qq: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

// 用户更新请求，缺省或空字符串的字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub real_name: Option<String>,
    pub college: Option<String>,
    pub student_id: Option<String>,
    pub qq: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}
