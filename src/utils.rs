use async_trait::async_trait;
use mockall::automock;
use std::env;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

pub fn get_env_var(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("env var \"{}\" not set", name))
}

#[automock]
#[async_trait]
pub trait Connectable {
    async fn is_connected(&self) -> bool;
    async fn connect(&mut self) -> Result<(), String>;
    async fn ping(&mut self) -> Result<(), String>;
}

pub async fn lock_connectable_mutex_safely<T: Connectable>(
    mutex: &Mutex<T>,
) -> Result<MutexGuard<T>, String> {
    let mut mutex_guard = match mutex.try_lock() {
        Ok(mutex_guard) => mutex_guard,
        Err(_) => return Err("Failed to lock mutex".to_string()),
    };
    if !mutex_guard.is_connected().await {
        match mutex_guard.connect().await {
            Ok(_) => (),
            Err(e) => return Err(e.to_string()),
        };
    } else {
        match mutex_guard.ping().await {
            Ok(_) => (),
            Err(e) => {
                warn!("Ping failed: {}. Attempting to reconnect...", e);
                match mutex_guard.connect().await {
                    Ok(_) => (),
                    Err(e) => return Err(e.to_string()),
                };
            }
        }
    };

    Ok(mutex_guard)
}

/// Lowercases, then collapses every run of non-alphanumeric characters into a
/// single hyphen. Used for the checkout route segments.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut gap = false;
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            gap = true;
        }
    }
    slug
}

/// Appends the origin route as a percent-encoded `returnUrl` query parameter.
/// The remediation screen reads it back with `extract_return_url`, so the
/// value is encoded exactly once here and decoded exactly once there.
pub fn with_return_url(route: &str, return_to: &str) -> String {
    format!("{}?returnUrl={}", route, urlencoding::encode(return_to))
}

pub fn extract_return_url(route: &str) -> Option<String> {
    let (_, query) = route.split_once('?')?;
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("returnUrl=") {
            return urlencoding::decode(value).ok().map(|v| v.into_owned());
        }
    }
    None
}
