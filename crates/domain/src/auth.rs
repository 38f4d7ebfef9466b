//! Registration, login, and session resolution.
//!
//! Passwords are stored as Argon2 PHC strings. Sessions are opaque tokens
//! persisted in the store; registering or logging in issues a fresh one.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::SessionToken;
use shop_store::{Session, ShopStore, StoreError, User};

use crate::error::DomainError;

/// Service for user accounts and sessions.
pub struct AuthService<S> {
    store: Arc<S>,
}

impl<S: ShopStore> AuthService<S> {
    /// Creates a new auth service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a new user and signs them in.
    #[tracing::instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, Session), DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::Validation("Username cannot be empty".into()));
        }
        if password.is_empty() {
            return Err(DomainError::Validation("Password cannot be empty".into()));
        }

        let user = User::new(username, hash_password(password)?);
        match self.store.insert_user(user.clone()).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => {
                return Err(DomainError::UsernameTaken(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let session = Session::new(user.id);
        self.store.insert_session(session.clone()).await?;
        tracing::info!(username = %user.username, "user registered");
        Ok((user, session))
    }

    /// Logs a user in with username and password.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`DomainError::InvalidCredentials`].
    #[tracing::instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, Session), DomainError> {
        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, password)? {
            return Err(DomainError::InvalidCredentials);
        }

        let session = Session::new(user.id);
        self.store.insert_session(session.clone()).await?;
        tracing::info!(username = %user.username, "user logged in");
        Ok((user, session))
    }

    /// Ends a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: SessionToken) -> Result<(), DomainError> {
        self.store.delete_session(token).await?;
        Ok(())
    }

    /// Resolves a session token to its user.
    ///
    /// Unknown tokens and sessions whose user no longer exists both come
    /// back as None.
    pub async fn current_user(&self, token: SessionToken) -> Result<Option<User>, DomainError> {
        let Some(session) = self.store.get_session(token).await? else {
            return Ok(None);
        };
        Ok(self.store.get_user(session.user_id).await?)
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DomainError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(stored_hash: &str, password: &str) -> Result<bool, DomainError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| DomainError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DomainError::PasswordHash(e.to_string())),
    }
}
