use super::ProblemService;
use crate::errors::Result;
use crate::models::problems::entities::Problem;

pub async fn list_problems(
    service: &ProblemService,
    direction_id: Option<i64>,
) -> Result<Vec<Problem>> {
    service.storage().list_problems(direction_id).await
}
