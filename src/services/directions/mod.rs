pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::directions::{
    entities::Direction,
    requests::{CreateDirectionRequest, UpdateDirectionRequest},
};
use crate::storage::Storage;

#[derive(Clone)]
pub struct DirectionService {
    storage: Arc<dyn Storage>,
}

impl DirectionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 创建方向
    pub async fn create_direction(&self, req: CreateDirectionRequest) -> Result<Direction> {
        create::create_direction(self, req).await
    }

    // 列出方向
    pub async fn list_directions(&self) -> Result<Vec<Direction>> {
        list::list_directions(self).await
    }

    // 获取方向详情（含题目）
    pub async fn get_direction(&self, direction_id: i64) -> Result<Direction> {
        get::get_direction(self, direction_id).await
    }

    // 更新方向
    pub async fn update_direction(
        &self,
        direction_id: i64,
        update: UpdateDirectionRequest,
    ) -> Result<Direction> {
        update::update_direction(self, direction_id, update).await
    }

    // 删除方向
    pub async fn delete_direction(&self, direction_id: i64) -> Result<()> {
        delete::delete_direction(self, direction_id).await
    }

    // 是否为方向负责人
    pub async fn is_manager(&self, direction_id: i64, user_id: i64) -> Result<bool> {
        self.storage.is_direction_manager(direction_id, user_id).await
    }
}
