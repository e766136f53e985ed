use super::DirectionService;
use crate::errors::{Result, StudioError};
use crate::models::directions::entities::Direction;

pub async fn get_direction(service: &DirectionService, direction_id: i64) -> Result<Direction> {
    let mut direction = service
        .storage()
        .get_direction_by_id(direction_id)
        .await?
        .ok_or_else(|| StudioError::direction_not_found("Direction not found"))?;

    let problems = service.storage().list_problems(Some(direction_id)).await?;
    direction.problems = Some(problems);
    Ok(direction)
}
