use tracing::info;

use super::SubmissionService;
use crate::errors::{Result, StudioError};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use crate::utils::validate::require_non_blank;

pub async fn create_submission(
    service: &SubmissionService,
    user_id: i64,
    req: CreateSubmissionRequest,
) -> Result<Submission> {
    require_non_blank("content", &req.content)?;

    let storage = service.storage();

    if storage.get_problem_by_id(req.problem_id).await?.is_none() {
        return Err(StudioError::problem_not_found("Problem not found"));
    }

    let point = storage
        .get_submission_point_by_id(req.submission_point_id)
        .await?
        .ok_or_else(|| StudioError::submission_point_not_found("Submission point not found"))?;

    // 提交点必须属于该题目
    if point.problem_id != req.problem_id {
        return Err(StudioError::invalid_reference(
            "Submission point does not belong to the problem",
        ));
    }

    let submission = storage.upsert_submission(user_id, req).await?;
    info!(
        "User {} submitted {} (problem {}, point {})",
        user_id, submission.id, submission.problem_id, submission.submission_point_id
    );
    Ok(submission)
}
