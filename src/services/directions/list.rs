use super::DirectionService;
use crate::errors::Result;
use crate::models::directions::entities::Direction;

pub async fn list_directions(service: &DirectionService) -> Result<Vec<Direction>> {
    service.storage().list_directions().await
}
