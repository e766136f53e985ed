use tracing::info;

use super::ScoreService;
use crate::errors::{Result, StudioError};
use crate::models::scores::entities::Score;
use crate::services::access::{Actor, Resource};

/// 与提交详情同样的可见范围
pub async fn list_by_submission(
    service: &ScoreService,
    actor: Actor,
    submission_id: i64,
) -> Result<Vec<Score>> {
    let submission = service
        .storage()
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| StudioError::submission_not_found("Submission not found"))?;

    if submission.user_id != actor.user_id
        && !service
            .guard()
            .can_manage(actor, Resource::Submission(submission_id))
            .await?
    {
        info!(
            "User {} denied access to scores of submission {}",
            actor.user_id, submission_id
        );
        return Err(StudioError::forbidden(
            "No permission to view scores of this submission",
        ));
    }

    service
        .storage()
        .list_scores_by_submission(submission_id)
        .await
}

pub async fn list_by_user(
    service: &ScoreService,
    user_id: i64,
    problem_id: Option<i64>,
) -> Result<Vec<Score>> {
    service
        .storage()
        .list_scores_by_user(user_id, problem_id)
        .await
}

pub async fn list_by_reviewer(
    service: &ScoreService,
    reviewer_id: i64,
    problem_id: Option<i64>,
) -> Result<Vec<Score>> {
    service
        .storage()
        .list_scores_by_reviewer(reviewer_id, problem_id)
        .await
}
