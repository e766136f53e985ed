use super::entities::Submission;
use serde::Serialize;

// 提交列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
}
