use serde::{Deserialize, Serialize};

use crate::models::problems::entities::Problem;
use crate::models::users::responses::UserBrief;

// 方向实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Direction {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub managers: Vec<UserBrief>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problems: Option<Vec<Problem>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
