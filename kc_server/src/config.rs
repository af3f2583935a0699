//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use knockout_cup::{AuthCode, DrawPolicy, Money, TournamentSettings};
use std::{collections::HashSet, net::SocketAddr, path::PathBuf};

/// Default bind address, the port the tournament UI talks to
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    5000,
);

/// Shortest accepted authorization code
pub const MIN_AUTH_CODE_LEN: usize = 4;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Shared secret for starting and resetting the tournament
    pub auth_code: AuthCode,
    /// Player display names, in roster order
    pub roster: Vec<String>,
    /// Fee, bonus and draw policy
    pub settings: TournamentSettings,
    /// JSON snapshot file; in-memory state when unset
    pub data_file: Option<PathBuf>,
    /// Prometheus scrape address; metrics are off when unset
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `data_file_override` - Optional snapshot path override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        data_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_env_opt("SERVER_BIND")?.unwrap_or(DEFAULT_BIND),
        };

        // Security configuration (REQUIRED)
        let auth_code =
            std::env::var("TOURNAMENT_AUTH_CODE").map_err(|_| ConfigError::MissingRequired {
                var: "TOURNAMENT_AUTH_CODE".to_string(),
                hint: "Pick the code organizers will type to start or reset the cup".to_string(),
            })?;

        if auth_code.trim().len() < MIN_AUTH_CODE_LEN {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_AUTH_CODE".to_string(),
                reason: format!("Must be at least {MIN_AUTH_CODE_LEN} characters"),
            });
        }

        let roster = std::env::var("TOURNAMENT_ROSTER")
            .map(|names| parse_roster(&names))
            .map_err(|_| ConfigError::MissingRequired {
                var: "TOURNAMENT_ROSTER".to_string(),
                hint: "Comma-separated player names, e.g. \"Ana,Bruno,Carla,Davi\"".to_string(),
            })?;

        let draw = match parse_env_opt::<u64>("DRAW_SEED")? {
            Some(seed) => DrawPolicy::Seeded(seed),
            None if parse_env_opt("DRAW_ORDERED")?.unwrap_or(false) => DrawPolicy::Ordered,
            None => DrawPolicy::Random,
        };

        let settings = TournamentSettings::new(
            Money::from_cents(parse_env_opt("ENTRY_FEE_CENTS")?.unwrap_or(1000)),
            Money::from_cents(parse_env_opt("BONUS_PER_WIN_CENTS")?.unwrap_or(200)),
            draw,
        );

        let data_file = data_file_override.or_else(|| {
            std::env::var("TOURNAMENT_DATA_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
        });

        Ok(ServerConfig {
            bind,
            auth_code: AuthCode::new(auth_code.trim()),
            roster,
            settings,
            data_file,
            metrics_bind: parse_env_opt("METRICS_BIND")?,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending variable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster.len() < 2 {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_ROSTER".to_string(),
                reason: format!("Needs at least 2 players, got {}", self.roster.len()),
            });
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.roster.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_ROSTER".to_string(),
                reason: format!("Duplicate player name: {duplicate}"),
            });
        }

        if self.settings.entry_fee.cents() <= 0 {
            return Err(ConfigError::Invalid {
                var: "ENTRY_FEE_CENTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.settings.bonus_per_win.is_negative() {
            return Err(ConfigError::Invalid {
                var: "BONUS_PER_WIN_CENTS".to_string(),
                reason: "Must not be negative".to_string(),
            });
        }

        if self.settings.bonus_per_win > self.settings.entry_fee {
            return Err(ConfigError::Invalid {
                var: "BONUS_PER_WIN_CENTS".to_string(),
                reason: format!(
                    "Cannot exceed the entry fee ({} cents)",
                    self.settings.entry_fee.cents()
                ),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Split a comma-separated roster, dropping blank entries
pub fn parse_roster(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Optional variable that must parse when present
fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}
