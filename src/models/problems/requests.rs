use serde::Deserialize;

// 创建题目请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub description: String,
    pub direction_id: i64,
}

// 更新题目请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProblemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

// 题目列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemListQuery {
    pub direction_id: Option<i64>,
}

// 创建提交点请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionPointRequest {
    pub name: String,
    pub max_score: i32,
}

// 更新提交点请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubmissionPointRequest {
    pub name: Option<String>,
    pub max_score: Option<i32>,
}
