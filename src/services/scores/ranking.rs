use super::ScoreService;
use crate::errors::{Result, StudioError};
use crate::models::scores::requests::MAX_RANKING_LIMIT;
use crate::models::scores::responses::RankingItem;

pub async fn ranking(
    service: &ScoreService,
    direction_id: Option<i64>,
    limit: u64,
) -> Result<Vec<RankingItem>> {
    if let Some(direction_id) = direction_id
        && service
            .storage()
            .get_direction_by_id(direction_id)
            .await?
            .is_none()
    {
        return Err(StudioError::direction_not_found("Direction not found"));
    }

    let limit = limit.clamp(1, MAX_RANKING_LIMIT);
    service.storage().ranking(direction_id, limit).await
}
