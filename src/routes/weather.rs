use axum::{extract::State, response::Html, response::Redirect, Extension, Form};
use serde::Deserialize;
use tower_sessions::Session;

use crate::constants::ERR_EMPTY_CITY;
use crate::error::Result;
use crate::models::SessionUser;
use crate::session::{take_flash, WeatherFlash, WEATHER_KEY};
use crate::views;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherForm {
    pub city: String,
}

/// GET /weather, rendering (and clearing) the last lookup result
pub async fn weather_page(
    Extension(user): Extension<SessionUser>,
    session: Session,
) -> Result<Html<String>> {
    let flash: Option<WeatherFlash> = take_flash(&session, WEATHER_KEY).await?;
    Ok(views::weather(&user, &flash.unwrap_or_default()))
}

/// POST /weather: look the city up, park the result in the session, redirect
pub async fn lookup_weather(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WeatherForm>,
) -> Result<Redirect> {
    let city = form.city.trim();

    let flash = if city.is_empty() {
        WeatherFlash {
            error: Some(ERR_EMPTY_CITY.to_string()),
            ..WeatherFlash::default()
        }
    } else {
        match state.weather.current(city).await {
            Ok(report) => WeatherFlash {
                city: Some(city.to_string()),
                report: Some(report),
                error: None,
            },
            Err(e) => WeatherFlash {
                city: Some(city.to_string()),
                report: None,
                error: Some(e.to_string()),
            },
        }
    };

    session.insert(WEATHER_KEY, flash).await?;

    Ok(Redirect::to("/weather"))
}
