#![allow(dead_code)]

use std::sync::Arc;

use studio_recruit::config::{AppConfig, Argon2Config};
use studio_recruit::models::auth::RegisterRequest;
use studio_recruit::models::directions::{entities::Direction, requests::CreateDirectionRequest};
use studio_recruit::models::problems::{
    entities::{Problem, SubmissionPoint},
    requests::{CreateProblemRequest, CreateSubmissionPointRequest},
};
use studio_recruit::models::users::entities::User;
use studio_recruit::runtime::lifetime::startup::seed_admin;
use studio_recruit::services::{Actor, AppServices};
use studio_recruit::storage::{Storage, create_storage};

pub const ADMIN_PASSWORD: &str = "admin-pass";

pub fn test_config() -> Arc<AppConfig> {
    let mut config = AppConfig::default();
    config.jwt.secret = "integration-test-secret".to_string();
    config.database.url = ":memory:".to_string();
    config.argon2 = Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    };
    config.admin.password = ADMIN_PASSWORD.to_string();
    Arc::new(config)
}

pub struct TestContext {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub services: AppServices,
}

/// 全新的内存数据库，已迁移并创建默认管理员
pub async fn setup() -> TestContext {
    let config = test_config();
    let storage = create_storage(&config).await.expect("create storage");
    seed_admin(&storage, &config).await.expect("seed admin");
    let services = AppServices::new(storage.clone(), config.clone());
    TestContext {
        config,
        storage,
        services,
    }
}

pub fn register_request(username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        nickname: format!("{username}-nick"),
        real_name: format!("{username} real"),
        college: "Computer Science".to_string(),
        student_id: format!("S-{username}"),
        qq: None,
        email: Some(format!("{username}@example.com")),
    }
}

impl TestContext {
    pub async fn register(&self, username: &str) -> User {
        self.services
            .auth
            .register(register_request(username, "secret1"))
            .await
            .expect("register user")
    }

    pub async fn admin(&self) -> User {
        self.storage
            .get_user_by_username("admin")
            .await
            .expect("query admin")
            .expect("admin seeded")
    }

    pub async fn admin_actor(&self) -> Actor {
        Actor::from(&self.admin().await)
    }

    pub async fn direction(&self, name: &str, manager_ids: Vec<i64>) -> Direction {
        self.services
            .directions
            .create_direction(CreateDirectionRequest {
                name: name.to_string(),
                description: format!("{name} direction"),
                manager_ids,
            })
            .await
            .expect("create direction")
    }

    pub async fn problem(&self, actor: Actor, direction_id: i64, title: &str) -> Problem {
        self.services
            .problems
            .create_problem(
                actor,
                CreateProblemRequest {
                    title: title.to_string(),
                    description: format!("{title} description"),
                    direction_id,
                },
            )
            .await
            .expect("create problem")
    }

    pub async fn point(
        &self,
        actor: Actor,
        problem_id: i64,
        name: &str,
        max_score: i32,
    ) -> SubmissionPoint {
        self.services
            .problems
            .create_submission_point(
                actor,
                problem_id,
                CreateSubmissionPointRequest {
                    name: name.to_string(),
                    max_score,
                },
            )
            .await
            .expect("create submission point")
    }
}
