use std::env;
use std::time::Duration;

use crate::db::FlushPolicy;
use crate::services::appointments::BookingRules;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_file: String,
    pub cors_origin: String,
    pub flush_policy: FlushPolicy,
    pub flush_interval: Duration,
    pub strict_transitions: bool,
    pub atomic_booking: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            data_file: env::var("DATA_FILE").unwrap_or_else(|_| "crm_data.json".to_string()),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            flush_policy: env::var("FLUSH_POLICY")
                .ok()
                .and_then(|v| FlushPolicy::parse(&v))
                .unwrap_or(FlushPolicy::WriteThrough),
            flush_interval: Duration::from_millis(
                env::var("FLUSH_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
            strict_transitions: env_flag("STRICT_TRANSITIONS").unwrap_or(true),
            atomic_booking: env_flag("ATOMIC_BOOKING").unwrap_or(true),
        }
    }

    pub fn booking_rules(&self) -> BookingRules {
        BookingRules {
            strict_transitions: self.strict_transitions,
            atomic_booking: self.atomic_booking,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    parse_flag(&env::var(name).ok()?)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
