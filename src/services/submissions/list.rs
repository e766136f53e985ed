use super::SubmissionService;
use crate::errors::Result;
use crate::models::submissions::entities::Submission;

pub async fn list_my_submissions(
    service: &SubmissionService,
    user_id: i64,
    problem_id: Option<i64>,
) -> Result<Vec<Submission>> {
    service
        .storage()
        .list_submissions_by_user(user_id, problem_id)
        .await
}
