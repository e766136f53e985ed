use tracing::info;

use super::ProblemService;
use crate::errors::Result;
use crate::models::problems::{entities::Problem, requests::CreateProblemRequest};
use crate::services::access::{Actor, Capability, Resource};
use crate::utils::validate::require_non_blank;

pub async fn create_problem(
    service: &ProblemService,
    actor: Actor,
    req: CreateProblemRequest,
) -> Result<Problem> {
    require_non_blank("title", &req.title)?;
    require_non_blank("description", &req.description)?;

    // 方向不存在时返回 DirectionNotFound
    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::Direction(req.direction_id))
        .await?;

    let problem = service.storage().create_problem(req).await?;
    info!(
        "Problem {} created in direction {} by user {}",
        problem.id, problem.direction_id, actor.user_id
    );
    Ok(problem)
}
