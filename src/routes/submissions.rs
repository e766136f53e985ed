use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::submissions::{
    requests::{CreateSubmissionRequest, ProblemFilterQuery},
    responses::SubmissionListResponse,
};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

pub async fn create_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let submission = service
        .create_submission(actor.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "Submission saved")))
}

pub async fn list_my_submissions(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    query: web::Query<ProblemFilterQuery>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let items = service
        .list_my_submissions(actor.user_id, query.problem_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "Submissions retrieved",
    )))
}

pub async fn get_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let submission = service.get_submission(actor, submission_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "Submission retrieved")))
}

pub async fn delete_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    service
        .delete_submission(actor.user_id, submission_id.0)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Submission deleted")))
}

pub async fn list_for_review(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    query: web::Query<ProblemFilterQuery>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let items = service
        .list_for_review(actor.user_id, query.problem_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "Submissions retrieved",
    )))
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_submission))
            .route("/my", web::get().to(list_my_submissions))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}", web::delete().to(delete_submission))
            .route(
                "/{id}/scores",
                web::get().to(super::scores::list_submission_scores),
            ),
    )
    .service(
        web::scope("/api/admin/submissions")
            .wrap(middlewares::RequireJWT)
            .route("/review", web::get().to(list_for_review)),
    );
}
