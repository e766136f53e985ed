//! 提交点管理
//!
//! 提交点的权限沿用其所属题目的方向负责人。

use tracing::info;

use super::ProblemService;
use crate::errors::{Result, StudioError};
use crate::models::problems::{
    entities::SubmissionPoint,
    requests::{CreateSubmissionPointRequest, UpdateSubmissionPointRequest},
};
use crate::services::access::{Actor, Capability, Resource};
use crate::utils::validate::require_non_blank;

fn validate_max_score(max_score: i32) -> Result<()> {
    if max_score < 1 {
        return Err(StudioError::invalid_params("max_score must be at least 1"));
    }
    Ok(())
}

pub async fn create_submission_point(
    service: &ProblemService,
    actor: Actor,
    problem_id: i64,
    req: CreateSubmissionPointRequest,
) -> Result<SubmissionPoint> {
    require_non_blank("name", &req.name)?;
    validate_max_score(req.max_score)?;

    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::Problem(problem_id))
        .await?;

    let point = service
        .storage()
        .create_submission_point(problem_id, req)
        .await?;
    info!(
        "Submission point {} created on problem {} by user {}",
        point.id, problem_id, actor.user_id
    );
    Ok(point)
}

pub async fn list_submission_points(
    service: &ProblemService,
    problem_id: i64,
) -> Result<Vec<SubmissionPoint>> {
    if service
        .storage()
        .get_problem_by_id(problem_id)
        .await?
        .is_none()
    {
        return Err(StudioError::problem_not_found("Problem not found"));
    }
    service.storage().list_submission_points(problem_id).await
}

pub async fn update_submission_point(
    service: &ProblemService,
    actor: Actor,
    point_id: i64,
    update: UpdateSubmissionPointRequest,
) -> Result<SubmissionPoint> {
    if let Some(max_score) = update.max_score {
        validate_max_score(max_score)?;
    }

    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::SubmissionPoint(point_id))
        .await?;

    let point = service
        .storage()
        .update_submission_point(point_id, update)
        .await?
        .ok_or_else(|| StudioError::submission_point_not_found("Submission point not found"))?;

    info!("Submission point {} updated by user {}", point.id, actor.user_id);
    Ok(point)
}

pub async fn delete_submission_point(
    service: &ProblemService,
    actor: Actor,
    point_id: i64,
) -> Result<()> {
    service
        .guard()
        .authorize(actor, Capability::Manage, Resource::SubmissionPoint(point_id))
        .await?;

    // 已有提交时存储层返回 Conflict
    if !service.storage().delete_submission_point(point_id).await? {
        return Err(StudioError::submission_point_not_found(
            "Submission point not found",
        ));
    }

    info!("Submission point {} deleted by user {}", point_id, actor.user_id);
    Ok(())
}
