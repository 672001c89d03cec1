//! qrforge runtime configuration handling

use crate::color::RgbColor;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrforgeConfig {
    /// Symbol rendering options
    pub qr: QrOptions,
    /// Generation history log
    pub history: HistoryOptions,
    /// Bundled asset lookup
    pub assets: AssetOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrforgeConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrforge.toml / qrforge.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrforge.toml", "qrforge.yaml", "qrforge.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrforge");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.history.apply_env_overrides();
        self.assets.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// Fixed rendering parameters for generated symbols
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Pixels per module edge
    pub box_size: u32,
    /// Quiet border width in modules
    pub border: u32,
    /// Edge length of the centered logo square, in pixels
    pub logo_size: u32,
    /// Edge length of the on-screen preview, in pixels
    pub preview_size: u32,
    /// Module color the form starts with
    pub default_fill: RgbColor,
    /// Background color the form starts with
    pub default_background: RgbColor,
    /// Decode the image after pasting a logo and warn when it no longer scans
    pub verify_logo: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 4,
            logo_size: 50,
            preview_size: 200,
            default_fill: RgbColor::BLACK,
            default_background: RgbColor::WHITE,
            verify_logo: true,
        }
    }
}

/// Where single generations are logged
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryOptions {
    /// Append-only CSV log of `payload,destination` rows
    pub file: PathBuf,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from("qr_history.csv"),
        }
    }
}

impl HistoryOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(file) = env::var("QRFORGE_HISTORY_FILE") {
            if !file.trim().is_empty() {
                self.file = PathBuf::from(file);
            }
        }
    }
}

/// Branding asset lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetOptions {
    /// Directory searched before the executable's and working directories
    pub dir: Option<PathBuf>,
    /// File name of the banner shown at the top of the window
    pub branding_file: String,
    /// Edge length the banner is scaled to, in pixels
    pub branding_size: u32,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            dir: None,
            branding_file: "branding.png".to_string(),
            branding_size: 100,
        }
    }
}

impl AssetOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("QRFORGE_ASSETS_DIR") {
            if dir.trim().is_empty() {
                self.dir = None;
            } else {
                self.dir = Some(PathBuf::from(dir));
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRFORGE_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRFORGE_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRFORGE_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRFORGE_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRFORGE_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_form_conventions() {
        let config = QrforgeConfig::default();
        assert_eq!(config.qr.box_size, 10);
        assert_eq!(config.qr.border, 4);
        assert_eq!(config.qr.logo_size, 50);
        assert_eq!(config.qr.default_fill, RgbColor::BLACK);
        assert_eq!(config.qr.default_background, RgbColor::WHITE);
        assert_eq!(config.history.file, PathBuf::from("qr_history.csv"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrforge.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[qr]\nbox_size = 8\ndefault_fill = \"navy\"\n\n[history]\nfile = \"log.csv\""
        )
        .unwrap();

        let config = QrforgeConfig::from_file(&path).unwrap();
        assert_eq!(config.qr.box_size, 8);
        assert_eq!(config.qr.border, 4);
        assert_eq!(config.qr.default_fill, RgbColor([0, 0, 128]));
        assert_eq!(config.history.file, PathBuf::from("log.csv"));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrforge.yaml");
        fs::write(&path, "logging:\n  level: debug\n  rotation: daily\n").unwrap();

        let config = QrforgeConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_bad_color_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrforge.toml");
        fs::write(&path, "[qr]\ndefault_background = \"sparkly\"\n").unwrap();

        assert!(matches!(
            QrforgeConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides_apply_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrforge.toml");
        fs::write(
            &path,
            "[history]\nfile = \"from-file.csv\"\n\n[assets]\ndir = \"/from/file\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let vars = [
            ("QRFORGE_HISTORY_FILE", "/tmp/env-history.csv"),
            ("QRFORGE_ASSETS_DIR", "/env/assets"),
            ("QRFORGE_LOG_LEVEL", "trace"),
            ("QRFORGE_LOG_COLOR", "off"),
            ("QRFORGE_LOG_ROTATION", "Hourly"),
        ];
        // SAFETY: no other test reads or writes QRFORGE_* variables.
        unsafe {
            for (key, value) in vars {
                env::set_var(key, value);
            }
        }
        let overridden = QrforgeConfig::load(Some(path.as_path()));

        unsafe {
            env::set_var("QRFORGE_ASSETS_DIR", "");
            env::set_var("QRFORGE_HISTORY_FILE", "  ");
        }
        let reset = QrforgeConfig::load(Some(path.as_path()));

        unsafe {
            for (key, _) in vars {
                env::remove_var(key);
            }
        }

        let config = overridden.unwrap();
        assert_eq!(config.history.file, PathBuf::from("/tmp/env-history.csv"));
        assert_eq!(config.assets.dir, Some(PathBuf::from("/env/assets")));
        assert_eq!(config.logging.level, "trace");
        assert!(!config.logging.color);
        assert_eq!(config.logging.rotation, Some(LogRotation::Hourly));

        // An empty assets dir clears the file value; a blank history file is ignored.
        let config = reset.unwrap();
        assert_eq!(config.assets.dir, None);
        assert_eq!(config.history.file, PathBuf::from("from-file.csv"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrforge.ini");
        fs::write(&path, "").unwrap();

        assert!(matches!(
            QrforgeConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }
}
