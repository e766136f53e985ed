use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::middlewares;
use crate::models::ApiResponse;
use crate::models::directions::{
    requests::{CreateDirectionRequest, UpdateDirectionRequest},
    responses::DirectionListResponse,
};
use crate::models::users::entities::UserRole;
use crate::services::DirectionService;
use crate::utils::SafeIDI64;

pub async fn list_directions(service: web::Data<DirectionService>) -> ActixResult<HttpResponse> {
    let items = service.list_directions().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DirectionListResponse { items },
        "Directions retrieved",
    )))
}

pub async fn get_direction(
    service: web::Data<DirectionService>,
    direction_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let direction = service.get_direction(direction_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(direction, "Direction retrieved")))
}

pub async fn create_direction(
    service: web::Data<DirectionService>,
    body: web::Json<CreateDirectionRequest>,
) -> ActixResult<HttpResponse> {
    let direction = service.create_direction(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(direction, "Direction created")))
}

pub async fn update_direction(
    service: web::Data<DirectionService>,
    direction_id: SafeIDI64,
    body: web::Json<UpdateDirectionRequest>,
) -> ActixResult<HttpResponse> {
    let direction = service
        .update_direction(direction_id.0, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(direction, "Direction updated")))
}

pub async fn delete_direction(
    service: web::Data<DirectionService>,
    direction_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    service.delete_direction(direction_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Direction deleted")))
}

// 配置路由
pub fn configure_directions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/directions")
            .route("", web::get().to(list_directions))
            .route("/{id}", web::get().to(get_direction)),
    )
    .service(
        web::scope("/api/admin/directions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Admin))
                    .route("", web::post().to(create_direction))
                    .route("/{id}", web::put().to(update_direction))
                    .route("/{id}", web::delete().to(delete_direction)),
            ),
    );
}
