use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::models::users::entities::User;

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub username: String,
    pub is_admin: bool,
    pub exp: usize, // Expiration time (时间戳)
    pub iat: usize, // Issued at (签发时间)
    pub nbf: usize, // Not before
    pub iss: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

/// JWT 签发与校验，使用 HS256
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_hours: i64,
    issuer: String,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expire_hours: config.expire_hours,
            issuer: config.issuer.clone(),
        }
    }

    /// 令牌有效期（秒）
    pub fn expires_in(&self) -> i64 {
        self.expire_hours * 3600
    }

    // 为用户生成访问令牌
    pub fn generate_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.generate_token_with_expiry(user, chrono::Duration::hours(self.expire_hours))
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        &self,
        user: &User,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            is_admin: user.is_admin,
            exp: expiration.timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
            nbf: now.timestamp() as usize,
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    // 验证 JWT token（签名、过期时间、生效时间与签发者）
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.set_issuer(&[self.issuer.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation).map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expire_hours: 24,
            issuer: "studio-recruit".to_string(),
        }
    }

    fn user() -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            password_hash: String::new(),
            nickname: "Alice".to_string(),
            real_name: "Alice".to_string(),
            college: "CS".to_string(),
            student_id: "1".to_string(),
            qq: None,
            email: None,
            is_admin: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_verify() {
        let jwt = JwtUtils::new(&config("test-secret"));
        let token = jwt.generate_token(&user()).unwrap();
        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username, "alice");
        assert!(claims.is_admin);
        assert_eq!(claims.iss, "studio-recruit");
        assert_eq!(jwt.expires_in(), 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtUtils::new(&config("secret-a"))
            .generate_token(&user())
            .unwrap();
        assert!(JwtUtils::new(&config("secret-b")).verify_token(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let token = JwtUtils::new(&config("secret")).generate_token(&user()).unwrap();
        let mut other = config("secret");
        other.issuer = "someone-else".to_string();
        assert!(JwtUtils::new(&other).verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = JwtUtils::new(&config("secret"));
        let token = jwt
            .generate_token_with_expiry(&user(), chrono::Duration::hours(-2))
            .unwrap();
        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let jwt = JwtUtils::new(&config("secret"));
        assert!(jwt.verify_token("not-a-token").is_err());
    }
}
