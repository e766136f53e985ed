pub mod login;
pub mod profile;
pub mod register;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    config: Arc<AppConfig>,
    jwt: JwtUtils,
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, config: Arc<AppConfig>, jwt: JwtUtils) -> Self {
        Self {
            storage,
            config,
            jwt,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn config(&self) -> &AppConfig {
        &self.config
    }

    pub(crate) fn jwt(&self) -> &JwtUtils {
        &self.jwt
    }

    // 用户注册
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        register::handle_register(self, req).await
    }

    // 登录验证
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        login::handle_login(self, req).await
    }

    // 获取当前用户资料
    pub async fn profile(&self, user_id: i64) -> Result<User> {
        profile::handle_profile(self, user_id).await
    }
}
