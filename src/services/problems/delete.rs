use tracing::info;

use super::ProblemService;
use crate::errors::{Result, StudioError};
use crate::services::access::{Actor, Capability, Resource};

pub async fn delete_problem(service: &ProblemService, actor: Actor, problem_id: i64) -> Result<()> {
    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::Problem(problem_id))
        .await?;

    // 已有提交的题目不允许删除，由存储层在事务内判定
    if !service.storage().delete_problem(problem_id).await? {
        return Err(StudioError::problem_not_found("Problem not found"));
    }

    info!("Problem {} deleted by user {}", problem_id, actor.user_id);
    Ok(())
}
