//! Server-side sessions on `tower-sessions`.
//!
//! A session is authenticated exactly when it carries a [`SessionUser`] under
//! [`USER_KEY`]. One-shot flash values (weather result, workout error) sit
//! beside it and are removed when shown.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::SessionUser;
use crate::weather::WeatherReport;

/// Session key for the authenticated identity
pub const USER_KEY: &str = "user";

/// Session key for the last weather lookup
pub const WEATHER_KEY: &str = "weather";

/// Session key for the last failed add-workout attempt
pub const WORKOUT_ERROR_KEY: &str = "workout_error";

/// Result of a weather lookup, shown once on the next page view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherFlash {
    pub city: Option<String>,
    pub report: Option<WeatherReport>,
    pub error: Option<String>,
}

/// Identity bound to the session, `None` when anonymous or expired
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>> {
    Ok(session.get(USER_KEY).await?)
}

/// Drop everything the session held and bind `user` under a fresh id
pub async fn establish(session: &Session, user: &SessionUser) -> Result<()> {
    session.cycle_id().await?;
    session.clear().await;
    session.insert(USER_KEY, user).await?;
    Ok(())
}

/// Remove and return a one-shot value
pub async fn take_flash<T: DeserializeOwned>(session: &Session, key: &str) -> Result<Option<T>> {
    Ok(session.remove(key).await?)
}

/// `SessionStore` kept in process memory
///
/// `save` only updates records that are still live, so a request that
/// finishes after its session ended cannot write it back. New sessions
/// always arrive through `create`.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore(Arc<Mutex<HashMap<Id, Record>>>);

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.0.lock().await.is_empty()
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.0.lock().await;

        let live = records
            .get(&record.id)
            .is_some_and(|stored| is_active(stored, now));
        if live {
            records.insert(record.id, record.clone());
        } else {
            records.remove(&record.id);
            tracing::debug!("Ignoring write to an ended session");
        }
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record, now))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for MemorySessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        self.0.lock().await.retain(|_, record| is_active(record, now));
        Ok(())
    }
}
