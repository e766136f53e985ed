use tracing::info;

use super::DirectionService;
use crate::errors::{Result, StudioError};
use crate::models::directions::{entities::Direction, requests::UpdateDirectionRequest};

pub async fn update_direction(
    service: &DirectionService,
    direction_id: i64,
    update: UpdateDirectionRequest,
) -> Result<Direction> {
    let replaces_managers = update.manager_ids.is_some();

    let direction = service
        .storage()
        .update_direction(direction_id, update)
        .await?
        .ok_or_else(|| StudioError::direction_not_found("Direction not found"))?;

    if replaces_managers {
        info!(
            "Direction {} updated, managers replaced ({} now)",
            direction.id,
            direction.managers.len()
        );
    } else {
        info!("Direction {} updated", direction.id);
    }
    Ok(direction)
}
