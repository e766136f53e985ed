//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_studio_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum StudioError {
            $($variant(String),)*
        }

        impl StudioError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(StudioError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(StudioError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(StudioError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl StudioError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        StudioError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_studio_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    PasswordHash("E004", "Password Hash Error"),
    Token("E005", "Token Error"),
    UserNotFound("E006", "User Not Found"),
    DirectionNotFound("E007", "Direction Not Found"),
    ProblemNotFound("E008", "Problem Not Found"),
    SubmissionPointNotFound("E009", "Submission Point Not Found"),
    SubmissionNotFound("E010", "Submission Not Found"),
    ScoreNotFound("E011", "Score Not Found"),
    Conflict("E012", "Conflict"),
    Forbidden("E013", "Forbidden"),
    InvalidCredential("E014", "Invalid Credential"),
    InvalidParams("E015", "Invalid Parameters"),
    InvalidReference("E016", "Invalid Reference"),
    Authentication("E017", "Authentication Error"),
    UserAlreadyExists("E018", "User Already Exists"),
}

impl StudioError {
    /// 是否为基础设施错误（需要记录 error 日志）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            StudioError::DatabaseConfig(_)
                | StudioError::DatabaseConnection(_)
                | StudioError::DatabaseOperation(_)
                | StudioError::PasswordHash(_)
                | StudioError::Token(_)
        )
    }

    /// 是否为资源不存在类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::UserNotFound(_)
                | StudioError::DirectionNotFound(_)
                | StudioError::ProblemNotFound(_)
                | StudioError::SubmissionPointNotFound(_)
                | StudioError::SubmissionNotFound(_)
                | StudioError::ScoreNotFound(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StudioError {}

impl From<sea_orm::DbErr> for StudioError {
    fn from(err: sea_orm::DbErr) -> Self {
        StudioError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
