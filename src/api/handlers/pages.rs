//! Templated pages that need no backend call.

use crate::api::{error::AppError, templates, AppState};
use axum::{
    extract::{Extension, Path},
    response::Html,
};
use minijinja::context;
use std::sync::Arc;

const WELCOME_TITLE: &str = "OTPi Frontend";
const WELCOME_MESSAGE: &str = "The OTPi frontend server is up and running.";
const APP_SHELL_MESSAGE: &str = "Sign in with a one-time code sent to your email.";

/// Pages served by the app shell: `(path segment, title)`.
const APP_PAGES: [(&str, &str); 2] = [("home", "Login"), ("register", "Register")];

/// Title of a registered app shell page.
#[must_use]
pub fn app_page_title(page: &str) -> Option<&'static str> {
    APP_PAGES
        .iter()
        .find(|(key, _)| *key == page)
        .map(|(_, title)| *title)
}

// axum handler for /
pub async fn welcome(state: Extension<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let html = state.templates().render(
        templates::WELCOME,
        context! {
            title => WELCOME_TITLE,
            message => WELCOME_MESSAGE,
        },
    )?;

    Ok(Html(html))
}

// axum handler for /{page}
pub async fn app_shell(
    Path(page): Path<String>,
    state: Extension<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let title = app_page_title(&page).ok_or(AppError::NotFound)?;

    let html = state.templates().render(
        templates::APP_SHELL,
        context! {
            title => title,
            message => APP_SHELL_MESSAGE,
            page => page,
        },
    )?;

    Ok(Html(html))
}

// fallback for every unregistered route
pub async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_pages_have_titles() {
        assert_eq!(app_page_title("home"), Some("Login"));
        assert_eq!(app_page_title("register"), Some("Register"));
    }

    #[test]
    fn unregistered_pages_have_none() {
        assert_eq!(app_page_title("main"), None);
        assert_eq!(app_page_title("login"), None);
        assert_eq!(app_page_title("Home"), None);
        assert_eq!(app_page_title(""), None);
    }
}
