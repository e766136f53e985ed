use serde::{Deserialize, Serialize};

use crate::models::scores::entities::Score;

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub problem_id: i64,
    pub submission_point_id: i64,
    pub total_score: i64, // 所有有效评分之和
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Score>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
