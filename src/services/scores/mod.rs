pub mod create;
pub mod delete;
pub mod list;
pub mod ranking;
pub mod update;

use std::sync::Arc;

use crate::errors::{Result, StudioError};
use crate::models::scores::{
    entities::Score,
    requests::{CreateScoreRequest, UpdateScoreRequest},
    responses::RankingItem,
};
use crate::services::access::{AccessGuard, Actor};
use crate::storage::Storage;

#[derive(Clone)]
pub struct ScoreService {
    storage: Arc<dyn Storage>,
    guard: AccessGuard,
}

impl ScoreService {
    pub fn new(storage: Arc<dyn Storage>, guard: AccessGuard) -> Self {
        Self { storage, guard }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    // 评分（同一评分者重复评分会覆盖）
    pub async fn create_score(&self, actor: Actor, req: CreateScoreRequest) -> Result<Score> {
        create::create_score(self, actor, req).await
    }

    // 提交的所有评分
    pub async fn list_by_submission(&self, actor: Actor, submission_id: i64) -> Result<Vec<Score>> {
        list::list_by_submission(self, actor, submission_id).await
    }

    // 用户收到的评分
    pub async fn list_by_user(&self, user_id: i64, problem_id: Option<i64>) -> Result<Vec<Score>> {
        list::list_by_user(self, user_id, problem_id).await
    }

    // 评分者给出的评分
    pub async fn list_by_reviewer(
        &self,
        reviewer_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        list::list_by_reviewer(self, reviewer_id, problem_id).await
    }

    // 修改自己的评分
    pub async fn update_score(
        &self,
        reviewer_id: i64,
        score_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Score> {
        update::update_score(self, reviewer_id, score_id, update).await
    }

    // 删除自己的评分
    pub async fn delete_score(&self, reviewer_id: i64, score_id: i64) -> Result<()> {
        delete::delete_score(self, reviewer_id, score_id).await
    }

    // 排行榜
    pub async fn ranking(&self, direction_id: Option<i64>, limit: u64) -> Result<Vec<RankingItem>> {
        ranking::ranking(self, direction_id, limit).await
    }

    // 分数必须在 [0, max_score] 内
    pub(crate) async fn check_score_ceiling(&self, submission_point_id: i64, score: i32) -> Result<()> {
        let point = self
            .storage
            .get_submission_point_by_id(submission_point_id)
            .await?
            .ok_or_else(|| StudioError::submission_point_not_found("Submission point not found"))?;
        validate_score(score, point.max_score)
    }
}

fn validate_score(score: i32, max_score: i32) -> Result<()> {
    if score < 0 {
        return Err(StudioError::invalid_params("Score must not be negative"));
    }
    if score > max_score {
        return Err(StudioError::invalid_params(format!(
            "Score must not exceed max score {max_score}"
        )));
    }
    Ok(())
}
