//! 排行榜聚合查询

use super::SeaOrmStorage;
use crate::errors::{Result, StudioError};
use crate::models::scores::responses::RankingItem;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement, Value};

// 仅统计挂在有效题目下的有效提交的有效评分
const TOTAL_EXPR: &str = "COALESCE(SUM(CASE WHEN p.id IS NULL THEN 0 ELSE s.score END), 0)";

impl SeaOrmStorage {
    /// 按总分降序、用户 ID 升序排列；没有评分的用户总分为 0
    pub async fn ranking_impl(
        &self,
        direction_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<RankingItem>> {
        let backend = self.db.get_database_backend();
        let stmt = build_ranking_statement(backend, direction_id, limit);

        RankingItem::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| StudioError::database_operation(format!("查询排行榜失败: {e}")))
    }
}

fn build_ranking_statement(backend: DbBackend, direction_id: Option<i64>, limit: u64) -> Statement {
    let int_type = match backend {
        DbBackend::MySql => "SIGNED",
        DbBackend::Postgres => "BIGINT",
        _ => "INTEGER",
    };
    let placeholder = match backend {
        DbBackend::Postgres => "$1",
        _ => "?",
    };

    // 方向条件放在 JOIN 中，保证零分用户仍然出现
    let direction_clause = match direction_id {
        Some(_) => format!(" AND p.direction_id = {placeholder}"),
        None => String::new(),
    };

    let sql = format!(
        "SELECT u.id AS user_id, u.nickname AS nickname, \
         CAST({TOTAL_EXPR} AS {int_type}) AS score \
         FROM users u \
         LEFT JOIN scores s ON s.user_id = u.id AND s.deleted_at IS NULL \
         LEFT JOIN submissions sub ON sub.id = s.submission_id AND sub.deleted_at IS NULL \
         LEFT JOIN problems p ON p.id = sub.problem_id AND p.deleted_at IS NULL{direction_clause} \
         WHERE u.deleted_at IS NULL \
         GROUP BY u.id, u.nickname \
         ORDER BY {TOTAL_EXPR} DESC, u.id ASC \
         LIMIT {limit}"
    );

    let values: Vec<Value> = direction_id.into_iter().map(Value::from).collect();
    Statement::from_sql_and_values(backend, sql, values)
}
