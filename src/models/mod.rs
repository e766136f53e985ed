//! 数据模型定义
//!
//! 每个业务域拆分为 `entities`（业务实体）、`requests`（请求体与查询参数）、
//! `responses`（响应体）。

pub mod auth;
pub mod common;
pub mod directions;
pub mod problems;
pub mod scores;
pub mod submissions;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 响应业务码，随响应体中的 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 用户与认证
    UserNotFound = 1001,
    UserAlreadyExists = 1002,
    InvalidPassword = 1003,
    Unauthorized = 1004,
    Forbidden = 1005,
    InvalidToken = 1006,

    // 资源不存在
    DirectionNotFound = 2001,
    ProblemNotFound = 2002,
    SubmissionNotFound = 2003,
    SubmissionPointNotFound = 2004,
    ScoreNotFound = 2005,

    // 参数
    InvalidParams = 3001,
    BindError = 3002,
    InvalidReference = 3003,

    Conflict = 4001,

    // 服务端
    DatabaseError = 5001,
    InternalError = 5002,
}
