//! Mock session handling. Nothing here verifies credentials: any well-formed
//! login succeeds and the token is an opaque marker kept in a slot.

use crate::models::User;
use crate::storage::{SlotStore, StorageError, TOKEN_KEY, USER_KEY};
use chrono::Utc;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub async fn login(slots: &SlotStore, email: &str, password: &str) -> Result<Session, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::Validation("Please provide both email and password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation("Invalid credentials"));
    }

    let name = email.split('@').next().unwrap_or(email).to_string();
    start_session(slots, email, name).await
}

pub async fn signup(
    slots: &SlotStore,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Session, AuthError> {
    let email = email.trim();
    let name = name.trim();
    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Err(AuthError::Validation("Please fill in all fields"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation("Password must be at least 6 characters"));
    }

    start_session(slots, email, name.to_string()).await
}

pub async fn logout(slots: &SlotStore) -> Result<(), AuthError> {
    slots.remove(USER_KEY).await?;
    slots.remove(TOKEN_KEY).await?;
    Ok(())
}

pub async fn current_session(slots: &SlotStore) -> Option<Session> {
    let user: User = slots.load(USER_KEY).await?;
    let token: String = slots.load(TOKEN_KEY).await?;
    Some(Session { user, token })
}

async fn start_session(slots: &SlotStore, email: &str, name: String) -> Result<Session, AuthError> {
    let user = User {
        id: Utc::now().timestamp_millis().to_string(),
        email: email.to_string(),
        name,
    };
    let token = format!("mock_token_{}", user.id);

    slots.persist(USER_KEY, &user).await?;
    slots.persist(TOKEN_KEY, &token).await?;
    Ok(Session { user, token })
}
