use tracing::info;

use super::ScoreService;
use crate::errors::{Result, StudioError};

pub async fn delete_score(service: &ScoreService, reviewer_id: i64, score_id: i64) -> Result<()> {
    if !service.storage().delete_score(score_id, reviewer_id).await? {
        info!(
            "Reviewer {} failed to delete score {}",
            reviewer_id, score_id
        );
        return Err(StudioError::forbidden(
            "Score not found or not owned by reviewer",
        ));
    }

    info!("Score {} deleted by reviewer {}", score_id, reviewer_id);
    Ok(())
}
