//! Login, signup and logout.
//!
//! The flow talks to the injected [`UserStore`] and to a `tower_sessions`
//! [`Session`] handle, so it runs the same with or without an HTTP layer in
//! front of it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::constants::{ERR_INVALID_CREDENTIALS, ERR_USERNAME_TAKEN};
use crate::db::UserStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, SessionUser};
use crate::security::{hash_password, verify_password};
use crate::session::establish;
use crate::validation::{first_signup_error, SignupForm};

/// Raw fields from the login form
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Values echoed back into a re-rendered form. Passwords are never echoed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FormEcho {
    pub username: String,
    pub email: String,
}

/// Outcome of a login or signup attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Identity bound to the session under a fresh id
    Authenticated(SessionUser),
    /// Attempt refused; show `error` on the form again
    Rejected { error: &'static str, form: FormEcho },
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Verify credentials and bind the user to the session
    ///
    /// Unknown usernames and wrong passwords get the same message and leave
    /// the session untouched.
    pub async fn login(&self, session: &Session, form: LoginForm) -> Result<AuthOutcome> {
        let LoginForm { username, password } = form;

        let Some(user) = self.users.find_by_username(&username).await? else {
            tracing::info!("Login failed for {}", username);
            return Ok(invalid_credentials(username));
        };

        if !verify_password(password, user.password_hash.clone()).await? {
            tracing::info!("Login failed for {}", username);
            return Ok(invalid_credentials(username));
        }

        let user = SessionUser::from(&user);
        establish(session, &user).await?;
        tracing::info!("User {} logged in", user.username);

        Ok(AuthOutcome::Authenticated(user))
    }

    /// Validate, create the user and bind it to the session
    ///
    /// The insert returns the assigned id, so no follow-up read is needed.
    pub async fn signup(&self, session: &Session, form: SignupForm) -> Result<AuthOutcome> {
        let echo = FormEcho {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
        };

        if let Some(error) = first_signup_error(&form) {
            tracing::debug!("Signup rejected on field {}", error.field);
            return Ok(AuthOutcome::Rejected {
                error: error.message,
                form: echo,
            });
        }

        let password_hash = hash_password(form.password, self.bcrypt_cost).await?;

        let new_user = NewUser {
            username: echo.username.clone(),
            email: echo.email.clone(),
            password_hash,
        };
        let user = match self.users.insert(new_user).await {
            Ok(user) => user,
            Err(AppError::UserAlreadyExists) => {
                return Ok(AuthOutcome::Rejected {
                    error: ERR_USERNAME_TAKEN,
                    form: echo,
                });
            }
            Err(e) => return Err(e),
        };

        let user = SessionUser::from(&user);
        establish(session, &user).await?;
        tracing::info!("New user {} signed up", user.username);

        Ok(AuthOutcome::Authenticated(user))
    }

    /// End the session. Anonymous sessions are a no-op.
    pub async fn logout(&self, session: &Session) -> Result<()> {
        session.flush().await?;
        tracing::debug!("Session destroyed");
        Ok(())
    }
}

fn invalid_credentials(username: String) -> AuthOutcome {
    AuthOutcome::Rejected {
        error: ERR_INVALID_CREDENTIALS,
        form: FormEcho {
            username,
            email: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ERR_WEAK_PASSWORD;
    use crate::db::MemoryUserStore;
    use crate::session::{current_user, MemorySessionStore};
    use tower_sessions::session::Id;

    const TEST_COST: u32 = 4;

    struct Harness {
        auth: AuthService,
        users: Arc<MemoryUserStore>,
        sessions: MemorySessionStore,
    }

    impl Harness {
        fn session(&self, id: Option<Id>) -> Session {
            Session::new(id, Arc::new(self.sessions.clone()), None)
        }
    }

    fn harness() -> Harness {
        let users = Arc::new(MemoryUserStore::new());
        let auth = AuthService::new(users.clone(), TEST_COST);
        Harness {
            auth,
            users,
            sessions: MemorySessionStore::new(),
        }
    }

    fn signup_form(username: &str, password: &str) -> SignupForm {
        SignupForm {
            username: username.to_string(),
            email: "a@b.com".to_string(),
            password: password.to_string(),
            confirm: password.to_string(),
        }
    }

    fn login_form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn authenticated(outcome: AuthOutcome) -> SessionUser {
        match outcome {
            AuthOutcome::Authenticated(user) => user,
            other => panic!("expected authentication, got {:?}", other),
        }
    }

    /// Sign alice1 up on a fresh session and return the persisted session id
    async fn signed_up(h: &Harness) -> Id {
        let session = h.session(None);
        h.auth
            .signup(&session, signup_form("alice1", "Str0ng!pass"))
            .await
            .unwrap();
        session.save().await.unwrap();
        session.id().unwrap()
    }

    #[tokio::test]
    async fn test_signup_creates_user_and_session() {
        let h = harness();
        let session = h.session(None);

        let outcome = h
            .auth
            .signup(&session, signup_form("alice1", "Str0ng!pass"))
            .await
            .unwrap();
        let user = authenticated(outcome);

        assert_eq!(user.username, "alice1");
        assert_eq!(h.users.count().await, 1);

        let stored = h.users.find_by_username("alice1").await.unwrap().unwrap();
        assert_eq!(stored.id, user.id);
        assert_ne!(stored.password_hash, "Str0ng!pass");

        session.save().await.unwrap();
        let reloaded = h.session(session.id());
        assert_eq!(current_user(&reloaded).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username_rejected() {
        let h = harness();
        signed_up(&h).await;

        let outcome = h
            .auth
            .signup(&h.session(None), signup_form("alice1", "0ther!Pass"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AuthOutcome::Rejected {
                error: ERR_USERNAME_TAKEN,
                form: FormEcho {
                    username: "alice1".to_string(),
                    email: "a@b.com".to_string(),
                },
            }
        );
        assert_eq!(h.users.count().await, 1);
    }

    #[tokio::test]
    async fn test_signup_validation_failure_creates_nothing() {
        let h = harness();
        let session = h.session(None);

        let outcome = h
            .auth
            .signup(&session, signup_form("  alice1 ", "abcdefgh"))
            .await
            .unwrap();

        match outcome {
            AuthOutcome::Rejected { error, form } => {
                assert_eq!(error, ERR_WEAK_PASSWORD);
                assert_eq!(form.username, "alice1");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(h.users.count().await, 0);
        assert!(current_user(&session).await.unwrap().is_none());
        assert!(h.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_signup_stores_trimmed_username() {
        let h = harness();

        let outcome = h
            .auth
            .signup(&h.session(None), signup_form("  alice1  ", "Str0ng!pass"))
            .await
            .unwrap();

        assert_eq!(authenticated(outcome).username, "alice1");
    }

    #[tokio::test]
    async fn test_login_success() {
        let h = harness();
        signed_up(&h).await;
        let session = h.session(None);

        let outcome = h
            .auth
            .login(&session, login_form("alice1", "Str0ng!pass"))
            .await
            .unwrap();
        let user = authenticated(outcome);

        assert_eq!(user.id, 1);
        assert_eq!(current_user(&session).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_login_unknown_user_and_wrong_password_look_the_same() {
        let h = harness();
        signed_up(&h).await;
        let sessions_before = h.sessions.len().await;
        let session = h.session(None);

        let unknown = h
            .auth
            .login(&session, login_form("nouser", "x"))
            .await
            .unwrap();
        let wrong = h
            .auth
            .login(&session, login_form("alice1", "Wr0ng!pass"))
            .await
            .unwrap();

        for (outcome, username) in [(unknown, "nouser"), (wrong, "alice1")] {
            assert_eq!(
                outcome,
                AuthOutcome::Rejected {
                    error: ERR_INVALID_CREDENTIALS,
                    form: FormEcho {
                        username: username.to_string(),
                        email: String::new(),
                    },
                }
            );
        }
        assert!(current_user(&session).await.unwrap().is_none());
        assert_eq!(h.sessions.len().await, sessions_before);
    }

    #[tokio::test]
    async fn test_login_replaces_previous_session() {
        let h = harness();
        let old_id = signed_up(&h).await;
        let session = h.session(Some(old_id));

        h.auth
            .login(&session, login_form("alice1", "Str0ng!pass"))
            .await
            .unwrap();
        session.save().await.unwrap();
        let new_id = session.id().unwrap();

        assert_ne!(old_id, new_id);
        assert!(current_user(&h.session(Some(old_id)))
            .await
            .unwrap()
            .is_none());
        assert_eq!(h.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let h = harness();
        let id = signed_up(&h).await;

        h.auth.logout(&h.session(Some(id))).await.unwrap();
        assert!(current_user(&h.session(Some(id))).await.unwrap().is_none());
        assert!(h.sessions.is_empty().await);

        // Idempotent
        h.auth.logout(&h.session(Some(id))).await.unwrap();
        h.auth.logout(&h.session(None)).await.unwrap();
    }
}
