use super::entities::{Problem, SubmissionPoint};
use serde::Serialize;

// 题目列表响应
#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub items: Vec<Problem>,
}

// 提交点列表响应
#[derive(Debug, Serialize)]
pub struct SubmissionPointListResponse {
    pub items: Vec<SubmissionPoint>,
}
