use serde::Deserialize;

// 提交请求，同一 (用户, 题目, 提交点) 重复提交会覆盖内容
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub problem_id: i64,
    pub submission_point_id: i64,
    pub content: String,
}

// 按题目筛选
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemFilterQuery {
    pub problem_id: Option<i64>,
}
