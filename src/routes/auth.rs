use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::ApiResponse;
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::services::AuthService;

pub async fn register(
    service: web::Data<AuthService>,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    let user = service.register(user_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Registration successful")))
}

pub async fn login(
    service: web::Data<AuthService>,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    let response = service.login(user_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
}

pub async fn profile(
    req: HttpRequest,
    service: web::Data<AuthService>,
) -> ActixResult<HttpResponse> {
    let actor = RequireJWT::extract_actor(&req)?;
    let user = service.profile(actor.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Profile retrieved")))
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    )
    .service(
        web::scope("/api/user")
            .wrap(middlewares::RequireJWT)
            .route("/profile", web::get().to(profile)),
    );
}
