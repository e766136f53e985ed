use tracing::info;

use super::SubmissionService;
use crate::errors::{Result, StudioError};
use crate::models::submissions::entities::Submission;
use crate::services::access::{Actor, Resource};

/// 提交者本人、管理员或所属方向负责人可查看
pub async fn get_submission(
    service: &SubmissionService,
    actor: Actor,
    submission_id: i64,
) -> Result<Submission> {
    let mut submission = service
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
            "User {} denied access to submission {}",
            actor.user_id, submission_id
        );
        return Err(StudioError::forbidden(
            "No permission to view this submission",
        ));
    }

    let scores = service
        .storage()
        .list_scores_by_submission(submission_id)
        .await?;
    submission.scores = Some(scores);
    Ok(submission)
}
