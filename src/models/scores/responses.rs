use super::entities::Score;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

// 评分列表响应
#[derive(Debug, Serialize)]
pub struct ScoreListResponse {
    pub items: Vec<Score>,
}

// 排行榜条目
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, PartialEq, Eq)]
pub struct RankingItem {
    pub user_id: i64,
    pub nickname: String,
    pub score: i64,
}

// 排行榜响应
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub items: Vec<RankingItem>,
}
