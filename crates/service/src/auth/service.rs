use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{LoginInput, OwnerAccount, OwnerSession, RegisterInput};
use super::errors::AuthError;
use super::repository::OwnerRepository;
use super::token::TokenService;

/// Account business service independent of web framework
pub struct AccountService<R: OwnerRepository> {
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: OwnerRepository> AccountService<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Register a new owner with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{service::AccountService, repository::mock::MockOwnerRepository};
    /// use service::auth::token::{TokenService, TokenConfig};
    /// use service::auth::domain::RegisterInput;
    /// let repo = Arc::new(MockOwnerRepository::default());
    /// let tokens = Arc::new(TokenService::new(&TokenConfig {
    ///     secret: "0123456789abcdef0123456789abcdef".into(),
    ///     access_ttl_hours: 1,
    ///     refresh_ttl_hours: 24,
    /// }));
    /// let svc = AccountService::new(repo, tokens);
    /// let input = RegisterInput {
    ///     email: "user@example.com".into(),
    ///     first_name: "Test".into(),
    ///     last_name: "Owner".into(),
    ///     telephone: "555-0100".into(),
    ///     address: "1 Main St".into(),
    ///     city: "Springfield".into(),
    ///     password: "Secret123".into(),
    /// };
    /// let owner = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(owner.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<OwnerAccount, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_owner_by_email(&input.email).await? {
            debug!("owner exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let owner = self.repo.create_owner(&input).await?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        let _cred = self.repo.upsert_password(owner.id, hash, "argon2".into()).await?;
        info!(owner_id = owner.id, email = %owner.email, "owner_registered");
        Ok(owner)
    }

    /// Authenticate an owner and issue their token pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{service::AccountService, repository::mock::MockOwnerRepository};
    /// use service::auth::token::{TokenService, TokenConfig};
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// let repo = Arc::new(MockOwnerRepository::default());
    /// let tokens = Arc::new(TokenService::new(&TokenConfig {
    ///     secret: "0123456789abcdef0123456789abcdef".into(),
    ///     access_ttl_hours: 1,
    ///     refresh_ttl_hours: 24,
    /// }));
    /// let svc = AccountService::new(repo, tokens.clone());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     email: "u@e.com".into(),
    ///     first_name: "N".into(),
    ///     last_name: "O".into(),
    ///     telephone: "555".into(),
    ///     address: "A".into(),
    ///     city: "C".into(),
    ///     password: "Passw0rd".into(),
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput {
    ///     email: "u@e.com".into(),
    ///     password: "Passw0rd".into(),
    /// })).unwrap();
    /// assert_eq!(session.owner.email, "u@e.com");
    /// assert_eq!(tokens.validate_token(&session.tokens.access_token).unwrap(), session.owner.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<OwnerSession, AuthError> {
        let owner = self
            .repo
            .find_owner_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(owner.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let tokens = self.tokens.issue_token(owner.id)?;
        info!(owner_id = owner.id, "owner_logged_in");
        Ok(OwnerSession { owner, tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockOwnerRepository;
    use crate::auth::token::TokenConfig;

    fn service() -> AccountService<MockOwnerRepository> {
        let repo = Arc::new(MockOwnerRepository::default());
        let tokens = Arc::new(TokenService::new(&TokenConfig {
            secret: "0123456789abcdef0123456789abcdef".into(),
            access_ttl_hours: 1,
            refresh_ttl_hours: 24,
        }));
        AccountService::new(repo, tokens)
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            email: email.into(),
            first_name: "Carla".into(),
            last_name: "Mendes".into(),
            telephone: "555-0101".into(),
            address: "12 Oak St".into(),
            city: "Springfield".into(),
            password: "S3curePass!".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = service();
        let owner = svc.register(register_input("a@b.com")).await.unwrap();
        let session = svc
            .login(LoginInput { email: "a@b.com".into(), password: "S3curePass!".into() })
            .await
            .unwrap();
        assert_eq!(session.owner.id, owner.id);
        assert!(!session.tokens.access_token.is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let svc = service();
        svc.register(register_input("a@b.com")).await.unwrap();
        let err = svc.register(register_input("a@b.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let svc = service();
        let mut input = register_input("a@b.com");
        input.password = "short".into();
        assert!(matches!(svc.register(input).await.unwrap_err(), AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_password_unauthorized() {
        let svc = service();
        svc.register(register_input("a@b.com")).await.unwrap();
        let err = svc
            .login(LoginInput { email: "a@b.com".into(), password: "wrong".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn unknown_email_unauthorized() {
        let svc = service();
        let err = svc
            .login(LoginInput { email: "nobody@b.com".into(), password: "whatever".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }
}
