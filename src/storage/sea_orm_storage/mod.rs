//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod directions;
mod problems;
mod ranking;
mod scores;
mod submission_points;
mod submissions;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{Result, StudioError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并执行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| StudioError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| StudioError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接相互独立，只能保留唯一且常驻的连接
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let (max_connections, idle_timeout) = if in_memory {
            (1, None)
        } else {
            (config.pool_size.max(1), Some(Duration::from_secs(300)))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect_with(opt)
            .await
            .map_err(|e| StudioError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| StudioError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(StudioError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 当前 Unix 时间戳（秒）
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 非空字符串才视为有效更新
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
    directions::{
        entities::Direction,
        requests::{CreateDirectionRequest, UpdateDirectionRequest},
    },
    problems::{
        entities::{Problem, SubmissionPoint},
        requests::{
            CreateProblemRequest, CreateSubmissionPointRequest, UpdateProblemRequest,
            UpdateSubmissionPointRequest,
        },
    },
    scores::{
        entities::Score,
        requests::{CreateScoreRequest, UpdateScoreRequest},
        responses::RankingItem,
    },
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    // 方向模块
    async fn create_direction(&self, req: CreateDirectionRequest) -> Result<Direction> {
        self.create_direction_impl(req).await
    }

    async fn get_direction_by_id(&self, id: i64) -> Result<Option<Direction>> {
        self.get_direction_by_id_impl(id).await
    }

    async fn list_directions(&self) -> Result<Vec<Direction>> {
        self.list_directions_impl().await
    }

    async fn update_direction(
        &self,
        id: i64,
        update: UpdateDirectionRequest,
    ) -> Result<Option<Direction>> {
        self.update_direction_impl(id, update).await
    }

    async fn delete_direction(&self, id: i64) -> Result<bool> {
        self.delete_direction_impl(id).await
    }

    async fn is_direction_manager(&self, direction_id: i64, user_id: i64) -> Result<bool> {
        self.is_direction_manager_impl(direction_id, user_id).await
    }

    async fn list_managed_direction_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_managed_direction_ids_impl(user_id).await
    }

    // 题目模块
    async fn create_problem(&self, req: CreateProblemRequest) -> Result<Problem> {
        self.create_problem_impl(req).await
    }

    async fn get_problem_by_id(&self, id: i64) -> Result<Option<Problem>> {
        self.get_problem_by_id_impl(id).await
    }

    async fn list_problems(&self, direction_id: Option<i64>) -> Result<Vec<Problem>> {
        self.list_problems_impl(direction_id).await
    }

    async fn update_problem(
        &self,
        id: i64,
        update: UpdateProblemRequest,
    ) -> Result<Option<Problem>> {
        self.update_problem_impl(id, update).await
    }

    async fn delete_problem(&self, id: i64) -> Result<bool> {
        self.delete_problem_impl(id).await
    }

    // 提交点模块
    async fn create_submission_point(
        &self,
        problem_id: i64,
        req: CreateSubmissionPointRequest,
    ) -> Result<SubmissionPoint> {
        self.create_submission_point_impl(problem_id, req).await
    }

    async fn get_submission_point_by_id(&self, id: i64) -> Result<Option<SubmissionPoint>> {
        self.get_submission_point_by_id_impl(id).await
    }

    async fn list_submission_points(&self, problem_id: i64) -> Result<Vec<SubmissionPoint>> {
        self.list_submission_points_impl(problem_id).await
    }

    async fn update_submission_point(
        &self,
        id: i64,
        update: UpdateSubmissionPointRequest,
    ) -> Result<Option<SubmissionPoint>> {
        self.update_submission_point_impl(id, update).await
    }

    async fn delete_submission_point(&self, id: i64) -> Result<bool> {
        self.delete_submission_point_impl(id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        user_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.upsert_submission_impl(user_id, req).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_by_user(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_by_user_impl(user_id, problem_id)
            .await
    }

    async fn list_submissions_in_directions(
        &self,
        direction_ids: &[i64],
        problem_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        self.list_submissions_in_directions_impl(direction_ids, problem_id)
            .await
    }

    async fn delete_submission(&self, id: i64, user_id: i64) -> Result<bool> {
        self.delete_submission_impl(id, user_id).await
    }

    // 评分模块
    async fn upsert_score(
        &self,
        reviewer_id: i64,
        user_id: i64,
        req: CreateScoreRequest,
    ) -> Result<Score> {
        self.upsert_score_impl(reviewer_id, user_id, req).await
    }

    async fn get_score_by_reviewer(&self, id: i64, reviewer_id: i64) -> Result<Option<Score>> {
        self.get_score_by_reviewer_impl(id, reviewer_id).await
    }

    async fn list_scores_by_submission(&self, submission_id: i64) -> Result<Vec<Score>> {
        self.list_scores_by_submission_impl(submission_id).await
    }

    async fn list_scores_by_user(
        &self,
        user_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        self.list_scores_by_user_impl(user_id, problem_id).await
    }

    async fn list_scores_by_reviewer(
        &self,
        reviewer_id: i64,
        problem_id: Option<i64>,
    ) -> Result<Vec<Score>> {
        self.list_scores_by_reviewer_impl(reviewer_id, problem_id)
            .await
    }

    async fn update_score(
        &self,
        id: i64,
        reviewer_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Option<Score>> {
        self.update_score_impl(id, reviewer_id, update).await
    }

    async fn delete_score(&self, id: i64, reviewer_id: i64) -> Result<bool> {
        self.delete_score_impl(id, reviewer_id).await
    }

    async fn ranking(&self, direction_id: Option<i64>, limit: u64) -> Result<Vec<RankingItem>> {
        self.ranking_impl(direction_id, limit).await
    }
}
