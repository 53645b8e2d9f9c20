//! Runtime configuration

use clap::Args;
use jiff::tz::TimeZone;

use crate::domain::{metrics::simulator::RandomSimulator, promotions::lifecycle::RetentionPolicy};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Promotion policy settings.
#[derive(Debug, Clone, Args)]
pub struct PolicyConfig {
    /// Days a deleted promotion stays restorable before it is purged
    #[arg(long, env = "RETENTION_DAYS", default_value_t = RetentionPolicy::DEFAULT_DAYS)]
    pub retention_days: u32,

    /// Time zone used to decide which calendar day "now" falls on
    #[arg(long, env = "PROMOTIONS_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,

    /// Upper bound on units sold per simulated sale
    #[arg(long, env = "SIMULATOR_MAX_UNITS", default_value_t = RandomSimulator::DEFAULT_MAX_UNITS)]
    pub simulator_max_units: u64,

    /// Seed for reproducible simulated sales
    #[arg(long, env = "SIMULATOR_SEED")]
    pub simulator_seed: Option<u64>,
}

impl PolicyConfig {
    /// Retention policy built from these settings.
    #[must_use]
    pub const fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.retention_days)
    }

    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is not in the time zone database.
    pub fn time_zone(&self) -> Result<TimeZone, jiff::Error> {
        if self.time_zone.eq_ignore_ascii_case("utc") {
            return Ok(TimeZone::UTC);
        }

        TimeZone::get(&self.time_zone)
    }

    /// Sales simulator built from these settings.
    #[must_use]
    pub fn simulator(&self) -> RandomSimulator {
        match self.simulator_seed {
            Some(seed) => RandomSimulator::seeded(self.simulator_max_units, seed),
            None => RandomSimulator::new(self.simulator_max_units),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            retention_days: RetentionPolicy::DEFAULT_DAYS,
            time_zone: "UTC".to_string(),
            simulator_max_units: RandomSimulator::DEFAULT_MAX_UNITS,
            simulator_seed: None,
        }
    }
}
