pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod review;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use crate::services::access::{AccessGuard, Actor};
use crate::storage::Storage;

#[derive(Clone)]
pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    guard: AccessGuard,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, guard: AccessGuard) -> Self {
        Self { storage, guard }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    // 提交（同一提交点重复提交会覆盖内容）
    pub async fn create_submission(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        create::create_submission(self, user_id, req).await
    }

    // 我的提交
    pub async fn list_my_submissions(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        list::list_my_submissions(self, user_id, problem_id).await
    }

    // 提交详情（含评分）
    pub async fn get_submission(&self, actor: Actor, submission_id: i64) -> Result<Submission> {
        get::get_submission(self, actor, submission_id).await
    }

    // 待评分列表
    pub async fn list_for_review(
        &self,
        reviewer_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        review::list_for_review(self, reviewer_id, problem_id).await
    }

    // 删除自己的提交
    pub async fn delete_submission(&self, user_id: i64, submission_id: i64) -> Result<()> {
        delete::delete_submission(self, user_id, submission_id).await
    }
}
