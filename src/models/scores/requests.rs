use serde::Deserialize;

pub const DEFAULT_RANKING_LIMIT: u64 = 10;
pub const MAX_RANKING_LIMIT: u64 = 100;

// 创建评分请求，同一 (提交, 评分者) 重复评分会覆盖
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScoreRequest {
    pub submission_id: i64,
    pub score: i32,
    #[serde(default)]
    pub comment: String,
}

// 更新评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScoreRequest {
    pub score: i32,
    #[serde(default)]
    pub comment: String,
}

// 排行榜查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingQuery {
    pub direction_id: Option<i64>,
    pub limit: Option<i64>,
}

impl RankingQuery {
    /// 默认 10，限制在 1..=100
    pub fn normalized_limit(&self) -> u64 {
        match self.limit {
            Some(limit) => limit.clamp(1, MAX_RANKING_LIMIT as i64) as u64,
            None => DEFAULT_RANKING_LIMIT,
        }
    }
}
