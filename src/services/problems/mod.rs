pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod points;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::problems::{
    entities::{Problem, SubmissionPoint},
    requests::{
        CreateProblemRequest, CreateSubmissionPointRequest, UpdateProblemRequest,
        UpdateSubmissionPointRequest,
    },
};
use crate::services::access::{AccessGuard, Actor};
use crate::storage::Storage;

#[derive(Clone)]
pub struct ProblemService {
    storage: Arc<dyn Storage>,
    guard: AccessGuard,
}

impl ProblemService {
    pub fn new(storage: Arc<dyn Storage>, guard: AccessGuard) -> Self {
        Self { storage, guard }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    // 创建题目
    pub async fn create_problem(&self, actor: Actor, req: CreateProblemRequest) -> Result<Problem> {
        create::create_problem(self, actor, req).await
    }

    // 列出题目
    pub async fn list_problems(&self, direction_id: Option<i64>) -> Result<Vec<Problem>> {
        list::list_problems(self, direction_id).await
    }

    // 获取题目详情
    pub async fn get_problem(&self, problem_id: i64) -> Result<Problem> {
        get::get_problem(self, problem_id).await
    }

    // 更新题目
    pub async fn update_problem(
        &self,
        actor: Actor,
        problem_id: i64,
        update: UpdateProblemRequest,
    ) -> Result<Problem> {
        update::update_problem(self, actor, problem_id, update).await
    }

    // 删除题目
    pub async fn delete_problem(&self, actor: Actor, problem_id: i64) -> Result<()> {
        delete::delete_problem(self, actor, problem_id).await
    }

    // 提交点
    pub async fn create_submission_point(
        &self,
        actor: Actor,
        problem_id: i64,
        req: CreateSubmissionPointRequest,
    ) -> Result<SubmissionPoint> {
        points::create_submission_point(self, actor, problem_id, req).await
    }

    pub async fn list_submission_points(&self, problem_id: i64) -> Result<Vec<SubmissionPoint>> {
        points::list_submission_points(self, problem_id).await
    }

    pub async fn update_submission_point(
        &self,
        actor: Actor,
        point_id: i64,
        update: UpdateSubmissionPointRequest,
    ) -> Result<SubmissionPoint> {
        points::update_submission_point(self, actor, point_id, update).await
    }

    pub async fn delete_submission_point(&self, actor: Actor, point_id: i64) -> Result<()> {
        points::delete_submission_point(self, actor, point_id).await
    }
}
