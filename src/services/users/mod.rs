pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::PaginationQuery;
use crate::models::users::{
    entities::User, requests::UpdateUserRequest, responses::UserListResponse,
};
use crate::storage::Storage;

#[derive(Clone)]
pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 获取用户列表
    pub async fn list_users(&self, query: PaginationQuery) -> Result<UserListResponse> {
        list::list_users(self, query).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        get::get_user(self, user_id).await
    }

    // 更新用户信息
    pub async fn update_user(&self, user_id: i64, update: UpdateUserRequest) -> Result<User> {
        update::update_user(self, user_id, update).await
    }

    // 删除用户
    pub async fn delete_user(&self, user_id: i64, current_user_id: i64) -> Result<()> {
        delete::delete_user(self, user_id, current_user_id).await
    }
}
