//! 访问控制
//!
//! 所有非管理员的写操作都归结为一次检查：调用者是否为资源所属方向的负责人。
//! `Capability::Manage` 允许管理员绕过检查，`Capability::Review` 要求必须是负责人。

use std::sync::Arc;

use tracing::info;

use crate::errors::{Result, StudioError};
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 发起操作的用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub is_admin: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// 管理题目与提交点
    Manage,
    /// 评分
    Review,
}

/// 受保护资源，均可追溯到所属方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Direction(i64),
    Problem(i64),
    SubmissionPoint(i64),
    Submission(i64),
}

#[derive(Clone)]
pub struct AccessGuard {
    storage: Arc<dyn Storage>,
}

impl AccessGuard {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 检查权限，通过时返回资源所属方向ID
    pub async fn authorize(
        &self,
        actor: Actor,
        capability: Capability,
        resource: Resource,
    ) -> Result<i64> {
        let direction_id = self.resolve_direction(resource).await?;

        if capability == Capability::Manage && actor.is_admin {
            return Ok(direction_id);
        }

        if self
            .storage
            .is_direction_manager(direction_id, actor.user_id)
            .await?
        {
            Ok(direction_id)
        } else {
            info!(
                "Access denied: user {} lacks {:?} on {:?} (direction {})",
                actor.user_id, capability, resource, direction_id
            );
            Err(StudioError::forbidden(
                "You do not manage the direction of this resource",
            ))
        }
    }

    /// 仅判断，不返回错误原因
    pub async fn can_manage(&self, actor: Actor, resource: Resource) -> Result<bool> {
        match self.authorize(actor, Capability::Manage, resource).await {
            Ok(_) => Ok(true),
            Err(StudioError::Forbidden(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // 资源 -> 所属方向
    async fn resolve_direction(&self, resource: Resource) -> Result<i64> {
        match resource {
            Resource::Direction(id) => self
                .storage
                .get_direction_by_id(id)
                .await?
                .map(|d| d.id)
                .ok_or_else(|| StudioError::direction_not_found("Direction not found")),
            Resource::Problem(id) => self.problem_direction(id).await,
            Resource::SubmissionPoint(id) => {
                let point = self
                    .storage
                    .get_submission_point_by_id(id)
                    .await?
                    .ok_or_else(|| {
                        StudioError::submission_point_not_found("Submission point not found")
                    })?;
                self.problem_direction(point.problem_id).await
            }
            Resource::Submission(id) => {
                let submission = self
                    .storage
                    .get_submission_by_id(id)
                    .await?
                    .ok_or_else(|| StudioError::submission_not_found("Submission not found"))?;
                self.problem_direction(submission.problem_id).await
            }
        }
    }

    async fn problem_direction(&self, problem_id: i64) -> Result<i64> {
        self.storage
            .get_problem_by_id(problem_id)
            .await?
            .map(|p| p.direction_id)
            .ok_or_else(|| StudioError::problem_not_found("Problem not found"))
    }
}
