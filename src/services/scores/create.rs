use tracing::info;

use super::ScoreService;
use crate::errors::{Result, StudioError};
use crate::models::scores::{entities::Score, requests::CreateScoreRequest};
use crate::services::access::{Actor, Capability, Resource};

pub async fn create_score(
    service: &ScoreService,
    actor: Actor,
    req: CreateScoreRequest,
) -> Result<Score> {
    let submission = service
        .storage()
        .get_submission_by_id(req.submission_id)
        .await?
        .ok_or_else(|| StudioError::submission_not_found("Submission not found"))?;

    // 评分必须是方向负责人，管理员也不例外
    service
        .guard()
        .authorize(actor, Capability::Review, Resource::Submission(submission.id))
        .await?;

    service
        .check_score_ceiling(submission.submission_point_id, req.score)
        .await?;

    let score = service
        .storage()
        .upsert_score(actor.user_id, submission.user_id, req)
        .await?;
    info!(
        "Reviewer {} scored submission {} with {}",
        actor.user_id, score.submission_id, score.score
    );
    Ok(score)
}
