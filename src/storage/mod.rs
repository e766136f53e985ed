use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{
    PaginationQuery,
    directions::{
        entities::Direction,
        requests::{CreateDirectionRequest, UpdateDirectionRequest},
    },
    problems::{
        entities::{Problem, SubmissionPoint},
        requests::{
            CreateProblemRequest, CreateSubmissionPointRequest, UpdateProblemRequest,
            UpdateSubmissionPointRequest,
        },
    },
    scores::{
        entities::Score,
        requests::{CreateScoreRequest, UpdateScoreRequest},
        responses::RankingItem,
    },
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 所有读取只返回未软删除的记录；返回 `Option`/`bool` 的方法以 `None`/`false`
/// 表示目标不存在（或不属于调用者）。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，用户名冲突时返回 UserAlreadyExists
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 分页列出用户
    async fn list_users_with_pagination(&self, query: PaginationQuery)
    -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 统计管理员数量
    async fn count_admins(&self) -> Result<u64>;

    /// 方向管理方法
    // 创建方向并设置负责人（不存在的用户会被忽略）
    async fn create_direction(&self, req: CreateDirectionRequest) -> Result<Direction>;
    // 获取方向（含负责人）
    async fn get_direction_by_id(&self, id: i64) -> Result<Option<Direction>>;
    // 列出所有方向（含负责人）
    async fn list_directions(&self) -> Result<Vec<Direction>>;
    // 更新方向，manager_ids 给出时整体替换负责人
    async fn update_direction(
        &self,
        id: i64,
        update: UpdateDirectionRequest,
    ) -> Result<Option<Direction>>;
    // 清空负责人并删除方向，仍有题目时返回 Conflict
    async fn delete_direction(&self, id: i64) -> Result<bool>;
    // 检查用户是否为方向负责人
    async fn is_direction_manager(&self, direction_id: i64, user_id: i64) -> Result<bool>;
    // 列出用户负责的方向ID
    async fn list_managed_direction_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    /// 题目管理方法
    // 方向不存在时返回 DirectionNotFound
    async fn create_problem(&self, req: CreateProblemRequest) -> Result<Problem>;
    // 获取题目（含提交点）
    async fn get_problem_by_id(&self, id: i64) -> Result<Option<Problem>>;
    // 列出题目（含提交点），可按方向筛选
    async fn list_problems(&self, direction_id: Option<i64>) -> Result<Vec<Problem>>;
    async fn update_problem(&self, id: i64, update: UpdateProblemRequest)
    -> Result<Option<Problem>>;
    // 同时删除提交点，仍有提交时返回 Conflict
    async fn delete_problem(&self, id: i64) -> Result<bool>;

    /// 提交点管理方法
    async fn create_submission_point(
        &self,
        problem_id: i64,
        req: CreateSubmissionPointRequest,
    ) -> Result<SubmissionPoint>;
    async fn get_submission_point_by_id(&self, id: i64) -> Result<Option<SubmissionPoint>>;
    async fn list_submission_points(&self, problem_id: i64) -> Result<Vec<SubmissionPoint>>;
    async fn update_submission_point(
        &self,
        id: i64,
        update: UpdateSubmissionPointRequest,
    ) -> Result<Option<SubmissionPoint>>;
    // 仍有提交时返回 Conflict
    async fn delete_submission_point(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 按 (用户, 题目, 提交点) upsert，题目或提交点已删除时返回对应的 NotFound
    async fn upsert_submission(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 获取提交（含总分）
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 列出用户的提交（含总分）
    async fn list_submissions_by_user(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>>;
    // 列出若干方向下的提交（含总分）
    async fn list_submissions_in_directions(
        &self,
        direction_ids: &[i64],
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>>;
    // 删除用户自己的提交及其评分
    async fn delete_submission(&self, id: i64, user_id: i64) -> Result<bool>;

    /// 评分管理方法
    // 按 (提交, 评分者) upsert，user_id 为提交者
    async fn upsert_score(
        &self,
        reviewer_id: i64,
        user_id: i64,
        req: CreateScoreRequest,
    ) -> Result<Score>;
    // 获取评分者自己的评分
    async fn get_score_by_reviewer(&self, id: i64, reviewer_id: i64) -> Result<Option<Score>>;
    async fn list_scores_by_submission(&self, submission_id: i64) -> Result<Vec<Score>>;
    async fn list_scores_by_user(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>>;
    async fn list_scores_by_reviewer(
        &self,
        reviewer_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>>;
    async fn update_score(
        &self,
        id: i64,
        reviewer_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Option<Score>>;
    async fn delete_score(&self, id: i64, reviewer_id: i64) -> Result<bool>;
    // 排行榜
    async fn ranking(&self, direction_id: Option<i64>, limit: u64) -> Result<Vec<RankingItem>>;
}

pub async fn create_storage(config: &AppConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(&config.database).await?;
    Ok(Arc::new(storage))
}
