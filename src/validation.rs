//! Signup form validation.
//!
//! Rules are an ordered list of (field, check, message). Every rule is
//! evaluated; callers report the first failure.

use serde::Deserialize;

use crate::constants::{
    EMAIL_MAX_LEN, ERR_EMAIL_TOO_LONG, ERR_INVALID_EMAIL, ERR_PASSWORD_MISMATCH,
    ERR_USERNAME_LENGTH, ERR_WEAK_PASSWORD, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};

/// Raw fields from the signup form
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// A single declarative check on a form of type `T`
pub struct Rule<T> {
    pub field: &'static str,
    pub message: &'static str,
    check: fn(&T) -> bool,
}

/// A rule that did not hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub static SIGNUP_RULES: [Rule<SignupForm>; 5] = [
    Rule {
        field: "username",
        message: ERR_USERNAME_LENGTH,
        check: |form| is_valid_username(&form.username),
    },
    Rule {
        field: "email",
        message: ERR_INVALID_EMAIL,
        check: |form| is_valid_email(form.email.trim()),
    },
    Rule {
        field: "email",
        message: ERR_EMAIL_TOO_LONG,
        check: |form| form.email.trim().chars().count() <= EMAIL_MAX_LEN,
    },
    Rule {
        field: "password",
        message: ERR_WEAK_PASSWORD,
        check: |form| is_strong_password(&form.password),
    },
    Rule {
        field: "confirm",
        message: ERR_PASSWORD_MISMATCH,
        check: |form| form.confirm == form.password,
    },
];

/// Evaluate all rules in order and collect the failures
pub fn validate<T>(rules: &[Rule<T>], input: &T) -> Vec<FieldError> {
    rules
        .iter()
        .filter(|rule| !(rule.check)(input))
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// First failing signup rule, if any
pub fn first_signup_error(form: &SignupForm) -> Option<FieldError> {
    validate(&SIGNUP_RULES, form).into_iter().next()
}

/// 5-20 characters after trimming
pub fn is_valid_username(username: &str) -> bool {
    let len = username.trim().chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
}

/// At least 8 characters with a lowercase letter, an uppercase letter,
/// a digit and a symbol. No upper bound.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Shape check: `local@domain.tld` without whitespace
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    if local.chars().any(|c| c.is_whitespace() || c == '@' || c.is_control()) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let label_ok = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    if !labels.iter().all(label_ok) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}
