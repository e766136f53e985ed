/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>`，通过后从存储中加载用户并放入请求扩展，
 * 供后续的角色中间件与处理函数使用。
 *
 * ```rust,ignore
 * web::scope("/api/submissions")
 *     .wrap(RequireJWT)
 *     .route("", web::post().to(create_submission))
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_actor(&req)` 取得当前用户。
 *
 * ## 失败响应
 *
 * - 缺少或格式错误的请求头：401，业务码 1004
 * - 令牌无效、过期或用户已删除：401，业务码 1006
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;
use crate::errors::StudioError;
use crate::models::{ErrorCode, users::entities::User};
use crate::services::access::Actor;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 认证失败原因，决定响应状态与业务码
enum AuthFailure {
    MissingToken,
    InvalidToken(String),
    Internal(String),
}

impl AuthFailure {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AuthFailure::MissingToken => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
            AuthFailure::InvalidToken(_) => (StatusCode::UNAUTHORIZED, ErrorCode::InvalidToken),
            AuthFailure::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            AuthFailure::MissingToken => "Missing or invalid Authorization header",
            AuthFailure::InvalidToken(msg) => msg,
            AuthFailure::Internal(_) => "Internal server error",
        }
    }
}

// 提取并验证 JWT，返回对应的有效用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AuthFailure::MissingToken)?;

    let jwt = req
        .app_data::<web::Data<JwtUtils>>()
        .ok_or_else(|| AuthFailure::Internal("JwtUtils not found in app data".to_string()))?;

    let claims = jwt.verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::InvalidToken("Invalid or expired token".to_string())
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::InvalidToken("Invalid user ID in token".to_string()))?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| AuthFailure::Internal("Storage not found in app data".to_string()))?
        .get_ref()
        .clone();

    // 令牌签发后被删除的用户视为令牌失效
    storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| AuthFailure::Internal(e.to_string()))?
        .ok_or_else(|| AuthFailure::InvalidToken("User no longer exists".to_string()))
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    match &failure {
                        AuthFailure::Internal(detail) => {
                            error!("JWT middleware failure on {}: {}", req.path(), detail);
                        }
                        _ => info!(
                            "JWT authentication failed for request to {}: {}",
                            req.path(),
                            failure.message()
                        ),
                    }
                    let (status, code) = failure.status_and_code();
                    Ok(req.into_response(
                        create_error_response(status, code, failure.message())
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前用户对应的 Actor，缺失时返回认证错误
    pub fn extract_actor(req: &HttpRequest) -> Result<Actor, StudioError> {
        req.extensions()
            .get::<User>()
            .map(Actor::from)
            .ok_or_else(|| StudioError::authentication("Authentication required"))
    }
}
