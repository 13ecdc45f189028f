//! PulseLog: a personal workout log with session-based authentication
//!
//! This module exports the core types and functions for testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;
pub mod validation;
pub mod views;
pub mod weather;

pub use auth::AuthService;
pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use db::{UserStore, WorkoutStore};
use weather::WeatherClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub users: Arc<dyn UserStore>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub weather: Arc<dyn WeatherClient>,
    pub config: Config,
}

impl AppState {
    /// Wire the stores together; the auth flow shares the user store
    pub fn new(
        config: Config,
        users: Arc<dyn UserStore>,
        workouts: Arc<dyn WorkoutStore>,
        weather: Arc<dyn WeatherClient>,
    ) -> Self {
        let auth = AuthService::new(users.clone(), config.bcrypt_cost);
        Self {
            auth,
            users,
            workouts,
            weather,
            config,
        }
    }
}
