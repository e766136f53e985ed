use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::problems::{
    requests::{
        CreateProblemRequest, CreateSubmissionPointRequest, ProblemListQuery,
        UpdateProblemRequest, UpdateSubmissionPointRequest,
    },
    responses::{ProblemListResponse, SubmissionPointListResponse},
};
use crate::services::ProblemService;
use crate::utils::SafeIDI64;

// 公开接口
pub async fn list_problems(
    service: web::Data<ProblemService>,
    query: web::Query<ProblemListQuery>,
) -> ActixResult<HttpResponse> {
    let items = service.list_problems(query.direction_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ProblemListResponse { items },
        "Problems retrieved",
    )))
}

pub async fn get_problem(
    service: web::Data<ProblemService>,
    problem_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let problem = service.get_problem(problem_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(problem, "Problem retrieved")))
}

pub async fn list_submission_points(
    service: web::Data<ProblemService>,
    problem_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let items = service.list_submission_points(problem_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionPointListResponse { items },
        "Submission points retrieved",
    )))
}

// 管理接口，权限由服务层按方向负责人校验
pub async fn create_problem(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    body: web::Json<CreateProblemRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let problem = service.create_problem(actor, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(problem, "Problem created")))
}

pub async fn update_problem(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    problem_id: SafeIDI64,
    body: web::Json<UpdateProblemRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let problem = service
        .update_problem(actor, problem_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(problem, "Problem updated")))
}

pub async fn delete_problem(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    problem_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    service.delete_problem(actor, problem_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Problem deleted")))
}

pub async fn create_submission_point(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    problem_id: SafeIDI64,
    body: web::Json<CreateSubmissionPointRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let point = service
        .create_submission_point(actor, problem_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(point, "Submission point created")))
}

pub async fn update_submission_point(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    point_id: SafeIDI64,
    body: web::Json<UpdateSubmissionPointRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let point = service
        .update_submission_point(actor, point_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(point, "Submission point updated")))
}

pub async fn delete_submission_point(
    req: HttpRequest,
    service: web::Data<ProblemService>,
    point_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    service.delete_submission_point(actor, point_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Submission point deleted")))
}

// 配置路由
pub fn configure_problems_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/problems")
            .route("", web::get().to(list_problems))
            .route("/{id}", web::get().to(get_problem))
            .route(
                "/{id}/submission-points",
                web::get().to(list_submission_points),
            ),
    )
    .service(
        web::scope("/api/admin/problems")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_problem))
            .route("/{id}", web::put().to(update_problem))
            .route("/{id}", web::delete().to(delete_problem))
            .route(
                "/{id}/submission-points",
                web::post().to(create_submission_point),
            ),
    )
    .service(
        web::scope("/api/admin/submission-points")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::put().to(update_submission_point))
            .route("/{id}", web::delete().to(delete_submission_point)),
    );
}
