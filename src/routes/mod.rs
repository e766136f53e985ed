pub mod auth;

pub mod users;

pub mod directions;

pub mod problems;

pub mod submissions;

pub mod scores;

pub use auth::configure_auth_routes;
pub use directions::configure_directions_routes;
pub use problems::configure_problems_routes;
pub use scores::configure_scores_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes) // 认证与个人资料
        .configure(configure_user_routes) // 用户管理
        .configure(configure_directions_routes) // 方向
        .configure(configure_problems_routes) // 题目与提交点
        .configure(configure_submissions_routes) // 提交
        .configure(configure_scores_routes); // 评分与排行榜
}
