//! # OTPi frontend
//!
//! `otpi` serves the browser side of the OTPi one-time-password login demo and
//! relays its API traffic to the authentication backend.
//!
//! ## Pages
//!
//! - `/` is a static welcome page.
//! - `/home` and `/register` render the same app shell; the embedded browser
//!   script (`/static/js/app.js`) drives OTP request, verification, sign-up and
//!   logout through the relay.
//! - `/main` shows the signed-in user's record. It needs the `token` session
//!   cookie; a missing or rejected token redirects to `/home`.
//!
//! ## Relay
//!
//! Every `/api/{path}` request is forwarded to `{api-base}/{path}` with its
//! method, query, body and non hop-by-hop headers. The backend answer is
//! relayed back as-is, with each `Set-Cookie` re-attached exactly once so the
//! browser receives the session cookie issued by the backend.
//!
//! The backend owns all authentication state. `otpi` never issues, inspects or
//! stores tokens.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
