use serde::{Deserialize, Serialize};

// 评分实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub score: i32,
    pub comment: String,
    pub user_id: i64, // 被评分者，即提交者
    pub submission_id: i64,
    pub reviewer_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
