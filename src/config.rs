use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DNS_TIMEOUT_SECS: u64 = 2;

/// Policy knobs for the validation pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig {
    /// Bound on each DNS lookup issued for a validation request.
    pub dns_timeout: Duration,
    /// When set, a disposable-provider domain fails the verdict instead of
    /// only producing an advisory message.
    pub reject_disposable: bool,
    /// When set, a domain that resolves but has no mail exchanger records
    /// fails the verdict instead of only producing a caution.
    pub require_mx: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(DEFAULT_DNS_TIMEOUT_SECS),
            reject_disposable: false,
            require_mx: false,
        }
    }
}

/// Process configuration, read once at startup from the environment
/// (`.env` honored via dotenv in `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub validation: ValidationConfig,
    /// Optional domains file replacing the compiled-in disposable list.
    pub disposable_domains_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `HOST`, `PORT`, `DNS_TIMEOUT_SECS`, `REJECT_DISPOSABLE`,
    /// `REQUIRE_MX` and `DISPOSABLE_DOMAINS_FILE`. Unset or unparseable
    /// values fall back to defaults rather than aborting startup.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_u16(env::var("PORT").ok(), DEFAULT_PORT),
            validation: ValidationConfig {
                dns_timeout: Duration::from_secs(parse_positive_u64(
                    env::var("DNS_TIMEOUT_SECS").ok(),
                    DEFAULT_DNS_TIMEOUT_SECS,
                )),
                reject_disposable: parse_bool(env::var("REJECT_DISPOSABLE").ok(), false),
                require_mx: parse_bool(env::var("REQUIRE_MX").ok(), false),
            },
            disposable_domains_file: env::var("DISPOSABLE_DOMAINS_FILE").ok().map(PathBuf::from),
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

fn parse_u16(value: Option<String>, default: u16) -> u16 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_positive_u64(value: Option<String>, default: u64) -> u64 {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}
