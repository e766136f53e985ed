//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 除 `direction_managers` 外，所有表都通过 `deleted_at` 软删除。

pub mod direction_managers;
pub mod directions;
pub mod problems;
pub mod scores;
pub mod submission_points;
pub mod submissions;
pub mod users;

use chrono::{DateTime, Utc};

/// Unix 秒转 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
