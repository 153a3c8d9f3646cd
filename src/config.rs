use crate::log::LogLevel;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_SCROLLED_OFFSET: f64 = 50.0;
const DEFAULT_SECTION_LOOKAHEAD: f64 = 150.0;
const DEFAULT_ANCHOR_OFFSET: f64 = 80.0;
const DEFAULT_PRELOADER_FALLBACK_MS: u64 = 2_000;
const DEFAULT_SENT_LABEL_RESET_MS: u64 = 3_000;
const DEFAULT_COUNTER_DURATION_SECONDS: f64 = 2.0;
const DEFAULT_OPACITY_RAMP: f64 = 500.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLLED_OFFSET_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const SECTION_LOOKAHEAD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const ANCHOR_OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const PRELOADER_FALLBACK_MS_BOUNDS: (u64, u64) = (0, 60_000);
const SENT_LABEL_RESET_MS_BOUNDS: (u64, u64) = (100, 60_000);
const COUNTER_DURATION_SECONDS_BOUNDS: (f64, f64) = (0.1, 30.0);
const OPACITY_RAMP_BOUNDS: (f64, f64) = (1.0, 100_000.0);

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_DIR: &str = "dist";

/// Tuning knobs for the page controllers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MotionConfig {
    /// Scroll offset past which the navbar carries the `scrolled` class.
    pub scrolled_offset: f64,
    /// How far ahead of a section's top the navbar already treats it as current.
    pub section_lookahead: f64,
    /// Space reserved for the fixed navbar when scrolling to an anchor.
    pub anchor_offset: f64,
    #[serde(serialize_with = "serialize_millis")]
    pub preloader_fallback: Duration,
    #[serde(serialize_with = "serialize_millis")]
    pub sent_label_reset: Duration,
    pub counter_duration_seconds: f64,
    /// Scroll distance over which the navbar background reaches full opacity.
    pub opacity_ramp: f64,
    pub log_level: LogLevel,
    pub strict_markup: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            scrolled_offset: DEFAULT_SCROLLED_OFFSET,
            section_lookahead: DEFAULT_SECTION_LOOKAHEAD,
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
            preloader_fallback: Duration::from_millis(DEFAULT_PRELOADER_FALLBACK_MS),
            sent_label_reset: Duration::from_millis(DEFAULT_SENT_LABEL_RESET_MS),
            counter_duration_seconds: DEFAULT_COUNTER_DURATION_SECONDS,
            opacity_ramp: DEFAULT_OPACITY_RAMP,
            log_level: DEFAULT_LOG_LEVEL,
            strict_markup: cfg!(debug_assertions),
        }
    }
}

impl MotionConfig {
    /// Builds a config from a key lookup such as `scrolled-offset`.
    ///
    /// Values that fail to parse or fall outside their bounds keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            scrolled_offset: parse_f64_with_bounds(
                lookup("scrolled-offset"),
                defaults.scrolled_offset,
                SCROLLED_OFFSET_BOUNDS,
            ),
            section_lookahead: parse_f64_with_bounds(
                lookup("section-lookahead"),
                defaults.section_lookahead,
                SECTION_LOOKAHEAD_BOUNDS,
            ),
            anchor_offset: parse_f64_with_bounds(
                lookup("anchor-offset"),
                defaults.anchor_offset,
                ANCHOR_OFFSET_BOUNDS,
            ),
            preloader_fallback: Duration::from_millis(parse_u64_with_bounds(
                lookup("preloader-fallback-ms"),
                DEFAULT_PRELOADER_FALLBACK_MS,
                PRELOADER_FALLBACK_MS_BOUNDS,
            )),
            sent_label_reset: Duration::from_millis(parse_u64_with_bounds(
                lookup("sent-label-reset-ms"),
                DEFAULT_SENT_LABEL_RESET_MS,
                SENT_LABEL_RESET_MS_BOUNDS,
            )),
            counter_duration_seconds: parse_f64_with_bounds(
                lookup("counter-duration"),
                defaults.counter_duration_seconds,
                COUNTER_DURATION_SECONDS_BOUNDS,
            ),
            opacity_ramp: parse_f64_with_bounds(
                lookup("opacity-ramp"),
                defaults.opacity_ramp,
                OPACITY_RAMP_BOUNDS,
            ),
            log_level: lookup("log-level")
                .and_then(|value| LogLevel::parse(&value))
                .unwrap_or(defaults.log_level),
            strict_markup: lookup("strict-markup")
                .and_then(|value| parse_bool(&value))
                .unwrap_or(defaults.strict_markup),
        }
    }

    /// Reads `MOTION_*` environment variables, e.g. `MOTION_SCROLLED_OFFSET`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(env_key(key)).ok())
    }
}

/// Settings for the native static-site server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub site_dir: std::path::PathBuf,
    pub log_level: LogLevel,
}

impl ServerConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let site_dir = lookup("SITE_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_DIR.to_string());
        let log_level = lookup("LOG_LEVEL")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            port,
            site_dir: site_dir.into(),
            log_level,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_key(key: &str) -> String {
    format!("MOTION_{}", key.replace('-', "_").to_ascii_uppercase())
}

fn parse_f64_with_bounds(value: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = MotionConfig::from_lookup(|_| None);
        assert_eq!(config, MotionConfig::default());
        assert_eq!(config.preloader_fallback, Duration::from_millis(2_000));
        assert_eq!(config.sent_label_reset, Duration::from_millis(3_000));
    }

    #[test]
    fn overrides_within_bounds_are_applied() {
        let config = MotionConfig::from_lookup(lookup_from(&[
            ("scrolled-offset", "120"),
            ("anchor-offset", " 64 "),
            ("log-level", "debug"),
            ("strict-markup", "off"),
        ]));

        assert_eq!(config.scrolled_offset, 120.0);
        assert_eq!(config.anchor_offset, 64.0);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.strict_markup);
    }

    #[test]
    fn out_of_bounds_or_garbage_keeps_default() {
        let config = MotionConfig::from_lookup(lookup_from(&[
            ("anchor-offset", "5000"),
            ("sent-label-reset-ms", "10"),
            ("section-lookahead", "NaN"),
            ("opacity-ramp", "wide"),
        ]));

        assert_eq!(config.anchor_offset, DEFAULT_ANCHOR_OFFSET);
        assert_eq!(config.sent_label_reset, Duration::from_millis(3_000));
        assert_eq!(config.section_lookahead, DEFAULT_SECTION_LOOKAHEAD);
        assert_eq!(config.opacity_ramp, DEFAULT_OPACITY_RAMP);
    }

    #[test]
    fn env_keys_are_prefixed_and_upper_snake() {
        assert_eq!(env_key("preloader-fallback-ms"), "MOTION_PRELOADER_FALLBACK_MS");
    }

    #[test]
    fn server_config_defaults_and_overrides() {
        let defaults = ServerConfig::from_lookup(|_| None);
        assert_eq!(defaults.port, 8080);
        assert_eq!(defaults.site_dir, std::path::PathBuf::from("dist"));

        let custom = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("SITE_DIR", "public"),
            ("LOG_LEVEL", "error"),
        ]));
        assert_eq!(custom.port, 3000);
        assert_eq!(custom.site_dir, std::path::PathBuf::from("public"));
        assert_eq!(custom.log_level, LogLevel::Error);
    }

    #[test]
    fn config_serializes_durations_as_millis() {
        let value = serde_json::to_value(MotionConfig::default()).expect("serializable");
        assert_eq!(value["preloader_fallback"], 2_000);
        assert_eq!(value["log_level"], "info");
    }
}
