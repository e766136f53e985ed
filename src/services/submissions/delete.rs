use tracing::info;

use super::SubmissionService;
use crate::errors::{Result, StudioError};

pub async fn delete_submission(
    service: &SubmissionService,
    user_id: i64,
    submission_id: i64,
) -> Result<()> {
    // 不存在与不属于当前用户不做区分
    if !service
        .storage()
        .delete_submission(submission_id, user_id)
        .await?
    {
        info!(
            "User {} failed to delete submission {}",
            user_id, submission_id
        );
        return Err(StudioError::forbidden("Submission not found or not owned"));
    }

    info!("Submission {} deleted by user {}", submission_id, user_id);
    Ok(())
}
