use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::scores::{
    requests::{CreateScoreRequest, RankingQuery, UpdateScoreRequest},
    responses::{RankingResponse, ScoreListResponse},
};
use crate::models::submissions::requests::ProblemFilterQuery;
use crate::services::ScoreService;
use crate::utils::SafeIDI64;

fn score_list(items: Vec<crate::models::scores::entities::Score>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        ScoreListResponse { items },
        "Scores retrieved",
    ))
}

pub async fn ranking(
    service: web::Data<ScoreService>,
    query: web::Query<RankingQuery>,
) -> ActixResult<HttpResponse> {
    let limit = query.normalized_limit();
    let items = service.ranking(query.direction_id, limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RankingResponse { items },
        "Ranking retrieved",
    )))
}

// 挂载在 /api/submissions/{id}/scores
pub async fn list_submission_scores(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let items = service.list_by_submission(actor, submission_id.0).await?;
    Ok(score_list(items))
}

pub async fn list_my_scores(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    query: web::Query<ProblemFilterQuery>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let items = service.list_by_user(actor.user_id, query.problem_id).await?;
    Ok(score_list(items))
}

pub async fn list_user_scores(
    service: web::Data<ScoreService>,
    user_id: SafeIDI64,
    query: web::Query<ProblemFilterQuery>,
) -> ActixResult<HttpResponse> {
    let items = service.list_by_user(user_id.0, query.problem_id).await?;
    Ok(score_list(items))
}

pub async fn create_score(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    body: web::Json<CreateScoreRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let score = service.create_score(actor, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(score, "Score saved")))
}

pub async fn list_reviewer_scores(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    query: web::Query<ProblemFilterQuery>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let items = service
        .list_by_reviewer(actor.user_id, query.problem_id)
        .await?;
    Ok(score_list(items))
}

pub async fn update_score(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    score_id: SafeIDI64,
    body: web::Json<UpdateScoreRequest>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let score = service
        .update_score(actor.user_id, score_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(score, "Score updated")))
}

pub async fn delete_score(
    req: HttpRequest,
    service: web::Data<ScoreService>,
    score_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    service.delete_score(actor.user_id, score_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Score deleted")))
}

// 配置路由
pub fn configure_scores_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/ranking", web::get().to(ranking))
        .service(
            web::scope("/api/scores")
                .wrap(middlewares::RequireJWT)
                .route("/my", web::get().to(list_my_scores)),
        )
        .service(
            web::scope("/api/users")
                .wrap(middlewares::RequireJWT)
                .route("/{id}/scores", web::get().to(list_user_scores)),
        )
        .service(
            web::scope("/api/admin/scores")
                .wrap(middlewares::RequireJWT)
                .route("", web::post().to(create_score))
                .route("/my", web::get().to(list_reviewer_scores))
                .route("/{id}", web::put().to(update_score))
                .route("/{id}", web::delete().to(delete_score)),
        );
}
