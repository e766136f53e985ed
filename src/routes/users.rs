use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, PaginationQuery};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// HTTP处理程序
pub async fn list_users(
    service: web::Data<UserService>,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    let users = service.list_users(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users, "Users retrieved")))
}

pub async fn get_user(
    service: web::Data<UserService>,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let user = service.get_user(user_id.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved")))
}

pub async fn update_user(
    service: web::Data<UserService>,
    user_id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    let user = service
        .update_user(user_id.0, update_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated")))
}

pub async fn delete_user(
    req: HttpRequest,
    service: web::Data<UserService>,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    service.delete_user(user_id.0, actor.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted")))
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_users))
                    .route("/{id}", web::get().to(get_user))
                    .route("/{id}", web::put().to(update_user))
                    .route("/{id}", web::delete().to(delete_user)),
            ),
    );
}
