use chrono::Utc;

use crate::config::Config;
use crate::store::HabitStore;

/// Placeholder shown when no city can be resolved.
pub const FALLBACK_LABEL: &str = "Location";

#[cfg(feature = "network")]
const GEO_URL: &str = "http://ip-api.com/json/?fields=status,city";

/// Resolve the header city label. Order: explicit config override, fresh
/// cache entry, network lookup (cached on success), placeholder. Failures
/// never propagate; rendering must not depend on this succeeding.
pub fn resolve_city(store: &HabitStore, config: &Config) -> String {
    if let Some(label) = &config.location_label {
        return label.clone();
    }

    let now_ms = Utc::now().timestamp_millis();
    if let Some(city) = store.load_cached_city(now_ms) {
        return city;
    }

    if !config.location_enabled {
        return FALLBACK_LABEL.to_string();
    }

    match lookup_city() {
        Some(city) => {
            if let Err(e) = store.cache_city(&city, now_ms) {
                log::warn!("failed to cache city label: {e}");
            }
            city
        }
        None => FALLBACK_LABEL.to_string(),
    }
}

#[cfg(feature = "network")]
fn lookup_city() -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?;
    let response = client.get(GEO_URL).send().ok()?;
    if !response.status().is_success() {
        log::warn!("geolocation lookup returned {}", response.status());
        return None;
    }
    let body: serde_json::Value = response.json().ok()?;
    if body.get("status").and_then(|v| v.as_str()) != Some("success") {
        return None;
    }
    let city = body.get("city").and_then(|v| v.as_str())?.trim();
    if city.is_empty() {
        None
    } else {
        Some(city.to_string())
    }
}

#[cfg(not(feature = "network"))]
fn lookup_city() -> Option<String> {
    None
}
