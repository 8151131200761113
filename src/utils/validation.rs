use crate::utils::error::{Result, WatchError};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Longest fetch or webhook timeout a config may ask for.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(120);

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> WatchError {
    WatchError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Pages and webhooks are plain http(s) endpoints.
pub fn validate_http_url(field: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, raw, format!("Unsupported URL scheme: {}", scheme))),
    }
}

/// Cache and menu files are JSON documents on the local disk.
pub fn validate_json_file(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() || path.contains('\0') {
        return Err(invalid(field, path, "Path must be a non-empty file name"));
    }
    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(invalid(field, path, "Expected a .json file"));
    }
    Ok(())
}

pub fn validate_required<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| WatchError::MissingConfigError {
        field: field.to_string(),
    })
}

pub fn validate_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty"));
    }
    Ok(())
}

pub fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > MAX_TIMEOUT.as_secs() {
        return Err(invalid(
            field,
            seconds,
            format!("Timeout must be between 1 and {} seconds", MAX_TIMEOUT.as_secs()),
        ));
    }
    Ok(())
}
