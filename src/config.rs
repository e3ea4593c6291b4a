use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub game: GameConfig,
    pub windows: WindowsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Class identifier of the monitored game, as assigned by the platform's
    /// game-tracking service.
    pub target_class_id: u32,
    /// Cadence of simulated game lifecycle events in --dry-run mode.
    pub dry_run_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowsConfig {
    /// Stable platform name of the desktop window.
    pub desktop: String,
    /// Stable platform name of the in-game window.
    pub in_game: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                filter: "overhud=info".to_string(),
            },
            game: GameConfig {
                target_class_id: 5426,
                dry_run_interval_secs: 10,
            },
            windows: WindowsConfig {
                desktop: "desktop".to_string(),
                in_game: "in_game".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("OVERHUD_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("invalid log format: {}", self.logging.format),
        }

        if self.game.target_class_id == 0 {
            anyhow::bail!("target_class_id must be non-zero");
        }

        if self.game.dry_run_interval_secs == 0 {
            anyhow::bail!("dry_run_interval_secs must be greater than 0");
        }

        if self.windows.desktop.is_empty() || self.windows.in_game.is_empty() {
            anyhow::bail!("window names must not be empty");
        }

        if self.windows.desktop == self.windows.in_game {
            anyhow::bail!(
                "desktop and in-game windows must have distinct names, both are '{}'",
                self.windows.desktop
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_class_id_rejected() {
        let mut config = Config::default();
        config.game.target_class_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colliding_window_names_rejected() {
        let mut config = Config::default();
        config.windows.in_game = config.windows.desktop.clone();
        assert!(config.validate().is_err());
    }
}
