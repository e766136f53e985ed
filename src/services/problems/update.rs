use tracing::info;

use super::ProblemService;
use crate::errors::{Result, StudioError};
use crate::models::problems::{entities::Problem, requests::UpdateProblemRequest};
use crate::services::access::{Actor, Capability, Resource};

pub async fn update_problem(
    service: &ProblemService,
    actor: Actor,
    problem_id: i64,
    update: UpdateProblemRequest,
) -> Result<Problem> {
    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::Problem(problem_id))
        .await?;

    let problem = service
        .storage()
        .update_problem(problem_id, update)
        .await?
        .ok_or_else(|| StudioError::problem_not_found("Problem not found"))?;

    info!("Problem {} updated by user {}", problem.id, actor.user_id);
    Ok(problem)
}
