//! Authentication service - registration, login and token verification.
//!
//! Tokens are HS256 JWTs carrying the user id (`sub`) and login.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Hash verified against when the login is unknown, so both failure
/// paths pay for one Argon2 verification.
static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("dummy-password-for-timing")
        .unwrap_or_else(|_| Password::from_hash(String::new()))
});

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub login: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user; duplicate logins are rejected
    async fn register(&self, login: String, password: String) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, login: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let hours = config.jwt_expiration_hours();
    let expires_in = hours
        .checked_mul(SECONDS_PER_HOUR)
        .ok_or_else(|| AppError::internal(format!("Token lifetime overflows: {}h", hours)))?;

    let now = Utc::now();
    let expires_at = Duration::try_hours(hours)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| AppError::internal(format!("Token lifetime out of range: {}h", hours)))?;

    let claims = Claims {
        sub: user.id,
        login: user.login.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, login: String, password: String) -> AppResult<User> {
        if self.uow.users().find_by_login(&login).await?.is_some() {
            tracing::debug!(login = %login, "Registration rejected: login taken");
            return Err(AppError::conflict("Login is already taken"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(login, password_hash).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, login: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_login(&login).await?;

        let password_valid = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()).verify(&password),
            None => {
                DUMMY_PASSWORD.verify(&password);
                false
            }
        };

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => {
                tracing::info!(login = %login, "Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{MockTodoRepository, MockUserRepository};
    use crate::config::MAX_JWT_EXPIRATION_HOURS;
    use crate::infra::{TodoRepository, TransactionContext, TxFuture, UserRepository};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn todos(&self) -> Arc<dyn TodoRepository> {
            Arc::new(MockTodoRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn service(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            user_repo: Arc::new(repo),
        };
        Authenticator::new(Arc::new(uow), Config::new("sqlite::memory:", SECRET).unwrap())
    }

    fn stored_user(id: i32, login: &str, password: &str) -> User {
        let hash = Password::new(password).unwrap().into_string();
        User::new(id, login.to_string(), hash)
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plain_text() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|login, hash| login == "alice" && hash != "s3cret" && hash.starts_with("$argon2"))
            .returning(|login, hash| Ok(User::new(1, login, hash)));

        let user = service(repo)
            .register("alice".to_string(), "s3cret".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert!(Password::from_hash(user.password_hash).verify("s3cret"));
    }

    #[tokio::test]
    async fn test_register_duplicate_login_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .withf(|login| login == "alice")
            .returning(|login| Ok(Some(User::new(1, login.to_string(), "hash".to_string()))));
        repo.expect_create().never();

        let result = service(repo)
            .register("alice".to_string(), "s3cret".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_empty_password_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));
        repo.expect_create().never();

        let result = service(repo).register("alice".to_string(), String::new()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let user = stored_user(5, "alice", "s3cret");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(repo);
        let token = service
            .login("alice".to_string(), "s3cret".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);

        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, 5);
        assert_eq!(claims.login, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_login_are_indistinguishable() {
        let user = stored_user(5, "alice", "s3cret");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |login| Ok((login == "alice").then(|| user.clone())));

        let service = service(repo);
        let wrong_password = service
            .login("alice".to_string(), "nope".to_string())
            .await
            .unwrap_err();
        let unknown_login = service
            .login("mallory".to_string(), "s3cret".to_string())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_login, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_login.to_string());
    }

    #[tokio::test]
    async fn test_verify_rejects_tampered_token() {
        let service = service(MockUserRepository::new());
        let result = service.verify_token("not.a.jwt");

        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_token_signed_with_other_secret() {
        let user = User::new(1, "alice".to_string(), String::new());
        let other = Config::new("sqlite::memory:", "another-secret-that-is-long-enough!!").unwrap();
        let token = generate_token(&user, &other).unwrap();

        let result = service(MockUserRepository::new()).verify_token(&token.access_token);
        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn test_verify_rejects_expired_token() {
        let issued = Utc::now() - Duration::hours(3);
        let claims = Claims {
            sub: 1,
            login: "alice".to_string(),
            exp: (issued + Duration::hours(1)).timestamp(),
            iat: issued.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = service(MockUserRepository::new()).verify_token(&token);
        assert!(matches!(result, Err(AppError::Jwt(_))));
    }

    #[tokio::test]
    async fn test_longest_lifetime_signs_without_overflow() {
        let user = User::new(1, "alice".to_string(), String::new());
        let config = Config::new("sqlite::memory:", SECRET)
            .unwrap()
            .with_jwt_expiration_hours(MAX_JWT_EXPIRATION_HOURS)
            .unwrap();

        let token = generate_token(&user, &config).unwrap();

        assert_eq!(token.expires_in, MAX_JWT_EXPIRATION_HOURS * SECONDS_PER_HOUR);
        assert!(service(MockUserRepository::new())
            .verify_token(&token.access_token)
            .is_ok());
    }
}
