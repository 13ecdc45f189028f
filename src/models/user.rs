use std::fmt;

use serde::{Deserialize, Serialize};

/// User row as stored in the `users` table
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Salted bcrypt hash; the plaintext password is never stored
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

// Hand-written so the hash never ends up in a log line
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// User about to be inserted; the password is already hashed
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Identity bound to an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            username: "alice1".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let rendered = format!("{:?}", user());
        assert!(rendered.contains("alice1"));
        assert!(!rendered.contains("$2b$04$secret"));
    }

    #[test]
    fn test_session_user_from_user() {
        let session_user = SessionUser::from(&user());
        assert_eq!(session_user.id, 7);
        assert_eq!(session_user.username, "alice1");
    }
}
