//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape`].

use axum::{http::StatusCode, response::Html};

use crate::auth::FormEcho;
use crate::models::{SessionUser, Workout};
use crate::session::WeatherFlash;

/// HTML-escape text for element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn nav(user: Option<&SessionUser>) -> String {
    let account = match user {
        Some(user) => format!(
            r#"<span class="user">{}</span> <a href="/logout">Log out</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Log in</a> <a href="/signup">Sign up</a>"#.to_string(),
    };

    format!(
        r#"<nav><a href="/">Dashboard</a> <a href="/workouts">My Workouts</a> <a href="/add-workout">Log Workout</a> <a href="/search">Search</a> <a href="/weather">Weather</a> <a href="/about">About</a> {}</nav>"#,
        account
    )
}

fn layout(title: &str, user: Option<&SessionUser>, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | PulseLog</title></head>
<body>
{nav}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        nav = nav(user),
        body = body,
    ))
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default()
}

fn workout_table(workouts: &[Workout]) -> String {
    if workouts.is_empty() {
        return "<p>No workouts logged yet.</p>".to_string();
    }

    let rows: String = workouts
        .iter()
        .map(|w| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{} min</td><td>{}</td></tr>",
                w.workout_date.format("%Y-%m-%d"),
                escape(&w.exercise),
                w.duration,
                escape(w.notes.as_deref().unwrap_or(""))
            )
        })
        .collect();

    format!(
        "<table><thead><tr><th>Date</th><th>Exercise</th><th>Duration</th><th>Notes</th></tr></thead><tbody>{}</tbody></table>",
        rows
    )
}

pub fn login(error: Option<&str>, form: &FormEcho) -> Html<String> {
    let body = format!(
        r#"{error}<form method="post" action="/login">
<label>Username <input name="username" value="{username}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>"#,
        error = error_block(error),
        username = escape(&form.username),
    );
    layout("Login", None, &body)
}

pub fn signup(error: Option<&str>, form: &FormEcho) -> Html<String> {
    let body = format!(
        r#"{error}<form method="post" action="/signup">
<label>Username <input name="username" value="{username}" required></label>
<label>Email <input type="email" name="email" value="{email}" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Confirm password <input type="password" name="confirm" required></label>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error = error_block(error),
        username = escape(&form.username),
        email = escape(&form.email),
    );
    layout("Sign Up", None, &body)
}

pub fn home(user: Option<&SessionUser>, recent: &[Workout]) -> Html<String> {
    let greeting = match user {
        Some(user) => format!("<p>Welcome back, {}.</p>", escape(&user.username)),
        None => "<p>Track your training, one session at a time.</p>".to_string(),
    };
    let body = format!(
        "{}<h2>Recent workouts</h2>{}",
        greeting,
        workout_table(recent)
    );
    layout("Dashboard", user, &body)
}

pub fn about(user: Option<&SessionUser>) -> Html<String> {
    layout(
        "About",
        user,
        "<p>PulseLog is a personal workout log with a quick weather check before you head out.</p>",
    )
}

pub fn workouts(user: &SessionUser, workouts: &[Workout], error: Option<&str>) -> Html<String> {
    let body = format!("{}{}", error_block(error), workout_table(workouts));
    layout("My Workouts", Some(user), &body)
}

pub fn add_workout(user: &SessionUser, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{}<form method="post" action="/add-workout">
<label>Exercise <input name="exercise" required></label>
<label>Duration (minutes) <input type="number" name="duration" min="1" required></label>
<label>Date <input type="date" name="date"></label>
<label>Notes <textarea name="notes"></textarea></label>
<button type="submit">Save</button>
</form>"#,
        error_block(error)
    );
    layout("Log Workout", Some(user), &body)
}

pub fn search(user: &SessionUser, search_text: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<form method="get" action="/search-results">
<label>Search <input name="search_text" value="{}" required></label>
<button type="submit">Search</button>
</form>"#,
        escape(search_text.unwrap_or(""))
    );
    layout("Search", Some(user), &body)
}

pub fn search_results(
    user: &SessionUser,
    search_text: &str,
    workouts: &[Workout],
    error: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"<p>Results for "{}"</p>{}{}<p><a href="/search">New search</a></p>"#,
        escape(search_text),
        error_block(error),
        workout_table(workouts)
    );
    layout("Search Results", Some(user), &body)
}

pub fn weather(user: &SessionUser, flash: &WeatherFlash) -> Html<String> {
    let report = flash
        .report
        .as_ref()
        .map(|r| {
            format!(
                r#"<section class="weather">
<h2>{location}</h2>
<p>{condition}: {description}</p>
<p>Temperature: {temperature}&deg;C (feels like {feels_like}&deg;C)</p>
<p>Humidity: {humidity}%</p>
<p>Wind: {wind} m/s</p>
</section>"#,
                location = escape(&r.location),
                condition = escape(&r.condition),
                description = escape(&r.description),
                temperature = r.temperature,
                feels_like = r.feels_like,
                humidity = r.humidity,
                wind = r.wind_speed,
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"{error}<form method="post" action="/weather">
<label>City <input name="city" value="{city}" required></label>
<button type="submit">Check weather</button>
</form>
{report}"#,
        error = error_block(flash.error.as_deref()),
        city = escape(flash.city.as_deref().unwrap_or("")),
        report = report,
    );
    layout("Weather", Some(user), &body)
}

pub fn error_page(status: StatusCode) -> Html<String> {
    let message = if status.is_server_error() {
        "Something went wrong. Please try again later."
    } else {
        status.canonical_reason().unwrap_or("Request failed")
    };
    layout("Error", None, &format!("<p>{}</p>", escape(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>'"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;&#39;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_login_escapes_echoed_username() {
        let form = FormEcho {
            username: "<b>".to_string(),
            email: String::new(),
        };
        let Html(page) = login(Some("Invalid credentials"), &form);

        assert!(page.contains("Invalid credentials"));
        assert!(page.contains(r#"value="&lt;b&gt;""#));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn test_signup_never_renders_password_values() {
        let form = FormEcho {
            username: "alice1".to_string(),
            email: "a@b.com".to_string(),
        };
        let Html(page) = signup(None, &form);

        assert!(page.contains(r#"value="alice1""#));
        assert!(page.contains(r#"value="a@b.com""#));
        assert!(page.contains(r#"<input type="password" name="password" required>"#));
    }

    #[test]
    fn test_error_page_hides_details() {
        let Html(page) = error_page(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(page.contains("Something went wrong"));
    }
}
