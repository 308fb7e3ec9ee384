//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CLOUDFLARE_PRIMARY, CLOUDFLARE_SECONDARY, DEFAULT_DKIM_SELECTOR, DNS_LIFETIME_SECS,
    DNS_TIMEOUT_SECS, GOOGLE_PRIMARY, GOOGLE_SECONDARY,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How audit results are delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Print findings to the terminal only
    Text,
    /// Print findings and write a JSON report file
    Json,
    /// Print findings and write a CSV report file
    Csv,
}

/// DNS servers and time bounds used by a resolution service.
///
/// Immutable once built; services only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    servers: Vec<IpAddr>,
    timeout: Duration,
    lifetime: Duration,
}

impl ResolverSettings {
    pub fn new(servers: Vec<IpAddr>, timeout: Duration, lifetime: Duration) -> Self {
        Self {
            servers,
            timeout,
            lifetime,
        }
    }

    /// Both resolvers of both providers, in failover order.
    pub fn standard() -> Self {
        Self::new(
            vec![
                GOOGLE_PRIMARY,
                GOOGLE_SECONDARY,
                CLOUDFLARE_PRIMARY,
                CLOUDFLARE_SECONDARY,
            ],
            Duration::from_secs(DNS_TIMEOUT_SECS),
            Duration::from_secs(DNS_LIFETIME_SECS),
        )
    }

    /// Primary resolver of each provider only.
    pub fn host_checks() -> Self {
        Self::new(
            vec![GOOGLE_PRIMARY, CLOUDFLARE_PRIMARY],
            Duration::from_secs(DNS_TIMEOUT_SECS),
            Duration::from_secs(DNS_LIFETIME_SECS),
        )
    }

    /// Returns a copy with a different total-lifetime ceiling.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn servers(&self) -> &[IpAddr] {
        &self.servers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use mail_posture::Config;
///
/// let config = Config {
///     domain: "example.com".to_string(),
///     dkim_selector: "google".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Domain to audit
    pub domain: String,

    /// DKIM selector queried at `<selector>._domainkey.<domain>`
    pub dkim_selector: String,

    /// Report output format
    pub format: OutputFormat,

    /// Print header status and diagnostics in addition to findings
    pub detailed: bool,

    /// Total DNS lifetime ceiling in seconds
    pub dns_timeout_secs: u64,

    /// Directory report files are written to
    pub report_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Resolver settings for the record analyzers, honouring the DNS timeout override.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings::standard().with_lifetime(Duration::from_secs(self.dns_timeout_secs))
    }

    /// Resolver settings for the host analyzer, honouring the DNS timeout override.
    pub fn host_resolver_settings(&self) -> ResolverSettings {
        ResolverSettings::host_checks().with_lifetime(Duration::from_secs(self.dns_timeout_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: String::new(),
            dkim_selector: DEFAULT_DKIM_SELECTOR.to_string(),
            format: OutputFormat::Text,
            detailed: false,
            dns_timeout_secs: DNS_LIFETIME_SECS,
            report_dir: PathBuf::from("."),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "mail_posture",
    version,
    about = "Audit a domain's SPF, DMARC, DKIM and mail transport security"
)]
pub struct Opt {
    /// Domain to audit
    pub domain: String,

    /// DKIM selector
    #[arg(long, default_value = DEFAULT_DKIM_SELECTOR)]
    pub dkim_selector: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Generate detailed security report
    #[arg(long)]
    pub detailed: bool,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_LIFETIME_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub dns_timeout: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domain: opt.domain,
            dkim_selector: opt.dkim_selector,
            format: opt.format,
            detailed: opt.detailed,
            dns_timeout_secs: opt.dns_timeout,
            log_level: opt.log_level,
            log_format: opt.log_format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_standard_settings_use_both_providers_in_order() {
        let settings = ResolverSettings::standard();
        assert_eq!(
            settings.servers(),
            &[
                GOOGLE_PRIMARY,
                GOOGLE_SECONDARY,
                CLOUDFLARE_PRIMARY,
                CLOUDFLARE_SECONDARY
            ]
        );
        assert_eq!(settings.timeout(), Duration::from_secs(2));
        assert_eq!(settings.lifetime(), Duration::from_secs(10));
    }

    #[test]
    fn test_host_check_settings_use_primary_pair() {
        let settings = ResolverSettings::host_checks();
        assert_eq!(settings.servers(), &[GOOGLE_PRIMARY, CLOUDFLARE_PRIMARY]);
    }

    #[test]
    fn test_dns_timeout_override_sets_lifetime() {
        let config = Config {
            dns_timeout_secs: 3,
            ..Default::default()
        };
        assert_eq!(config.resolver_settings().lifetime(), Duration::from_secs(3));
        assert_eq!(
            config.host_resolver_settings().lifetime(),
            Duration::from_secs(3)
        );
        // per-query timeout is untouched
        assert_eq!(config.resolver_settings().timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_cli_defaults() {
        let opt = Opt::parse_from(["mail_posture", "example.com"]);
        let config = Config::from(opt);
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.dkim_selector, "selector1");
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.detailed);
        assert_eq!(config.dns_timeout_secs, 10);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_cli_and_library_defaults_agree() {
        let parsed = Config::from(Opt::parse_from(["mail_posture", "example.com"]));
        let default = Config::default();
        assert_eq!(parsed.log_level, default.log_level);
        assert_eq!(parsed.log_format, default.log_format);
        assert_eq!(parsed.dns_timeout_secs, default.dns_timeout_secs);
        assert_eq!(parsed.dkim_selector, default.dkim_selector);
    }

    #[test]
    fn test_cli_options() {
        let opt = Opt::parse_from([
            "mail_posture",
            "example.org",
            "--dkim-selector",
            "google",
            "--format",
            "csv",
            "--detailed",
            "--dns-timeout",
            "4",
        ]);
        let config = Config::from(opt);
        assert_eq!(config.dkim_selector, "google");
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(config.detailed);
        assert_eq!(config.dns_timeout_secs, 4);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Opt::try_parse_from(["mail_posture", "example.com", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_zero_dns_timeout() {
        let result = Opt::try_parse_from(["mail_posture", "example.com", "--dns-timeout", "0"]);
        assert!(result.is_err());
    }
}
