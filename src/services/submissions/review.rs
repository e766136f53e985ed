use super::SubmissionService;
use crate::errors::Result;
use crate::models::submissions::entities::Submission;

/// 评分者负责的所有方向下的提交；筛选的题目不在负责范围内时返回空列表
pub async fn list_for_review(
    service: &SubmissionService,
    reviewer_id: i64,
    problem_id: Option<i64>,
) -> Result<Vec<Submission>> {
    let direction_ids = service
        .storage()
        .list_managed_direction_ids(reviewer_id)
        .await?;
    if direction_ids.is_empty() {
        return Ok(Vec::new());
    }

    service
        .storage()
        .list_submissions_in_directions(&direction_ids, problem_id)
        .await
}
