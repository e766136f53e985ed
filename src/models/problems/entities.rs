use serde::{Deserialize, Serialize};

// 提交点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPoint {
    pub id: i64,
    pub name: String,
    pub max_score: i32,
    pub problem_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 题目实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub direction_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_points: Option<Vec<SubmissionPoint>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
