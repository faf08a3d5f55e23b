//! Shared-secret resolution.
//!
//! Only this module reads the environment; the [`crate::Authenticator`] is
//! always handed its key explicitly, which keeps the codec, adapters and
//! workflows testable without any setup.

use std::env;
use tracing::warn;

/// Primary key variable, checked first.
pub const SIGNING_KEY_ENV: &str = "DOCSEAL_SIGNING_KEY";
/// Fallback shared with the notarization backend's session secret.
pub const FALLBACK_KEY_ENV: &str = "SECRET_KEY";
/// Development fallback; real deployments must configure a key.
pub const DEV_DEFAULT_KEY: &str = "default-signing-key-change-me";

/// Resolve the MAC secret: explicit value, then `DOCSEAL_SIGNING_KEY`,
/// then `SECRET_KEY`, then the development default.
///
/// The lookup order matches the notarization backend, so the tool and the
/// relay derive the same key and cross-component verification agrees.
pub fn resolve_secret(explicit: Option<String>) -> String {
    if let Some(secret) = explicit {
        if !secret.is_empty() {
            return secret;
        }
    }
    for var in [SIGNING_KEY_ENV, FALLBACK_KEY_ENV] {
        if let Ok(secret) = env::var(var) {
            if !secret.is_empty() {
                return secret;
            }
        }
    }
    warn!("no signing key configured; falling back to the development default");
    DEV_DEFAULT_KEY.to_string()
}
