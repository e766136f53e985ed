pub mod access;
pub mod auth;
pub mod directions;
pub mod problems;
pub mod scores;
pub mod submissions;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

pub use access::{AccessGuard, Actor, Capability, Resource};
pub use auth::AuthService;
pub use directions::DirectionService;
pub use problems::ProblemService;
pub use scores::ScoreService;
pub use submissions::SubmissionService;
pub use users::UserService;

/// 全部业务服务，启动时构建一次
#[derive(Clone)]
pub struct AppServices {
    pub storage: Arc<dyn Storage>,
    pub jwt: JwtUtils,
    pub auth: AuthService,
    pub users: UserService,
    pub directions: DirectionService,
    pub problems: ProblemService,
    pub submissions: SubmissionService,
    pub scores: ScoreService,
}

impl AppServices {
    pub fn new(storage: Arc<dyn Storage>, config: Arc<AppConfig>) -> Self {
        let jwt = JwtUtils::new(&config.jwt);
        let guard = AccessGuard::new(storage.clone());
        Self {
            auth: AuthService::new(storage.clone(), config.clone(), jwt.clone()),
            users: UserService::new(storage.clone()),
            directions: DirectionService::new(storage.clone()),
            problems: ProblemService::new(storage.clone(), guard.clone()),
            submissions: SubmissionService::new(storage.clone(), guard.clone()),
            scores: ScoreService::new(storage.clone(), guard),
            storage,
            jwt,
        }
    }

    /// 注册为 app_data，中间件与处理函数按类型取用
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.jwt.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.users.clone()))
            .app_data(web::Data::new(self.directions.clone()))
            .app_data(web::Data::new(self.problems.clone()))
            .app_data(web::Data::new(self.submissions.clone()))
            .app_data(web::Data::new(self.scores.clone()));
    }
}
