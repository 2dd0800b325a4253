//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9\-]{0,61}[A-Za-z0-9])?)*(:(?P<port>\d{1,5}))?$",
    )
    .unwrap()
});
static RE_IPV6: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[0-9A-Fa-f:.]+\](:(?P<port>\d{1,5}))?$").unwrap());
static RE_HTTP_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "EPD_HOST" => validate_host(value)?,
        "EPD_PREVIEW" => {
            if value.trim().is_empty() {
                return Err("must be a file path".into());
            }
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Validate a display address: IPv4, hostname, or bracketed IPv6, with
/// an optional port.
pub fn validate_host(value: &str) -> Result<(), String> {
    let caps = RE_HOSTNAME
        .captures(value)
        .or_else(|| RE_IPV6.captures(value))
        .ok_or("invalid address (expected IP or hostname with optional :port)")?;

    if let Some(port) = caps.name("port") {
        let port: u32 = port.as_str().parse().map_err(|_| "invalid port")?;
        if !(1..=65535).contains(&port) {
            return Err("port must be between 1 and 65535".into());
        }
    }
    Ok(())
}

/// True when `value` starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    RE_HTTP_URL.is_match(value)
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "EPD_DITHER" | "EPD_DRY_RUN" | "EPD_FIT")
}
