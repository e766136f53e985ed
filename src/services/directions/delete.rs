use tracing::info;

use super::DirectionService;
use crate::errors::{Result, StudioError};

pub async fn delete_direction(service: &DirectionService, direction_id: i64) -> Result<()> {
    let storage = service.storage();

    if storage.get_direction_by_id(direction_id).await?.is_none() {
        return Err(StudioError::direction_not_found("Direction not found"));
    }

    // 方向下仍有题目时存储层返回 Conflict
    if !storage.delete_direction(direction_id).await? {
        return Err(StudioError::direction_not_found("Direction not found"));
    }

    info!("Direction {} deleted", direction_id);
    Ok(())
}
