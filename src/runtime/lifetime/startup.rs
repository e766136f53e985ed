use crate::config::{AdminConfig, AppConfig};
use crate::errors::{Result, StudioError};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

fn admin_request(admin: &AdminConfig, password_hash: String) -> CreateUserRequest {
    CreateUserRequest {
        username: admin.username.clone(),
        password: password_hash,
        nickname: "Administrator".to_string(),
        real_name: "Administrator".to_string(),
        college: "-".to_string(),
        student_id: "-".to_string(),
        qq: None,
        email: None,
        is_admin: true,
    }
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何管理员，则按配置创建一个
pub async fn seed_admin(storage: &Arc<dyn Storage>, config: &AppConfig) -> Result<()> {
    let admins = storage.count_admins().await?;
    if admins > 0 {
        debug!("Database already has {} admin(s), skipping admin seed", admins);
        return Ok(());
    }
    info!("No admin found in database, creating default admin account...");

    // 获取密码：优先使用配置（含 ADMIN_PASSWORD），否则生成随机密码
    let password = if config.admin.password.is_empty() {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    } else {
        config.admin.password.clone()
    };

    let password_hash = hash_password(&password, &config.argon2)?;

    match storage
        .create_user(admin_request(&config.admin, password_hash))
        .await
    {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
            Ok(())
        }
        // 同名普通用户已存在时不覆盖
        Err(StudioError::UserAlreadyExists(_)) => {
            warn!(
                "User '{}' already exists but is not an admin, skipping admin seed",
                config.admin.username
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// 准备服务器启动的上下文
/// 包括加密组件、存储与迁移、默认管理员
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage(config).await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage, config).await?;

    Ok(StartupContext { storage })
}
