use tracing::info;

use super::ScoreService;
use crate::errors::{Result, StudioError};
use crate::models::scores::{entities::Score, requests::UpdateScoreRequest};

pub async fn update_score(
    service: &ScoreService,
    reviewer_id: i64,
    score_id: i64,
    update: UpdateScoreRequest,
) -> Result<Score> {
    let existing = service
        .storage()
        .get_score_by_reviewer(score_id, reviewer_id)
        .await?
        .ok_or_else(|| StudioError::forbidden("Score not found or not owned by reviewer"))?;

    let submission = service
        .storage()
        .get_submission_by_id(existing.submission_id)
        .await?
        .ok_or_else(|| StudioError::submission_not_found("Submission not found"))?;
    service
        .check_score_ceiling(submission.submission_point_id, update.score)
        .await?;

    let score = service
        .storage()
        .update_score(score_id, reviewer_id, update)
        .await?
        .ok_or_else(|| StudioError::forbidden("Score not found or not owned by reviewer"))?;

    info!(
        "Reviewer {} updated score {} to {}",
        reviewer_id, score.id, score.score
    );
    Ok(score)
}
