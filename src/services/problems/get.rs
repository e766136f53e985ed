use super::ProblemService;
use crate::errors::{Result, StudioError};
use crate::models::problems::entities::Problem;

pub async fn get_problem(service: &ProblemService, problem_id: i64) -> Result<Problem> {
    service
        .storage()
        .get_problem_by_id(problem_id)
        .await?
        .ok_or_else(|| StudioError::problem_not_found("Problem not found"))
}
