use tracing::info;

use super::DirectionService;
use crate::errors::Result;
use crate::models::directions::{entities::Direction, requests::CreateDirectionRequest};
use crate::utils::validate::require_non_blank;

pub async fn create_direction(
    service: &DirectionService,
    req: CreateDirectionRequest,
) -> Result<Direction> {
    require_non_blank("name", &req.name)?;

    let direction = service.storage().create_direction(req).await?;
    info!(
        "Direction {} created with {} manager(s)",
        direction.id,
        direction.managers.len()
    );
    Ok(direction)
}
