//! Runtime configuration for `curvelab`.
//!
//! [`Config`] holds the initial value of every panel field plus the UI
//! toggles. It is read from an optional TOML file and then overridden by
//! CLI flags.
//!
//! ```toml
//! [ui]
//! page = "motion"
//! color = "never"
//!
//! [transform]
//! curve = "hyperbola"
//! a = 2.0
//! b = 1.0
//! h = 2.0
//! branch = "left"
//!
//! [motion]
//! omega = 2.5
//! dt = 0.05
//! ```

use std::path::{Path, PathBuf};

use conics::{Branch, CurveKind, DEFAULT_DT, PathKind};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::pages::Page;
use crate::theme::ColorMode;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Terminal and display settings.
    pub ui: UiConfig,
    /// Initial values for the transform tab.
    pub transform: TransformConfig,
    /// Initial values for the motion tab.
    pub motion: MotionConfig,
}

/// `[ui]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Color output mode.
    pub color: ColorMode,
    /// Tab shown at startup.
    pub page: Page,
    /// Whether to use the alternate screen.
    pub alt_screen: bool,
    /// Input polling rate.
    pub fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            page: Page::Transform,
            alt_screen: true,
            fps: 60,
        }
    }
}

/// `[transform]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Curve family.
    pub curve: CurveKind,
    /// Horizontal shift.
    pub h: f64,
    /// Vertical shift.
    pub k: f64,
    /// Horizontal stretch or parabola steepness.
    pub a: f64,
    /// Vertical stretch.
    pub b: f64,
    /// Hyperbola branch.
    pub branch: Branch,
    /// Lower plot bound on both axes.
    pub range_min: f64,
    /// Upper plot bound on both axes.
    pub range_max: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            curve: CurveKind::Ellipse,
            h: 0.0,
            k: 0.0,
            a: 3.0,
            b: 2.0,
            branch: Branch::Right,
            range_min: -6.0,
            range_max: 6.0,
        }
    }
}

/// `[motion]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Path shape.
    pub path: PathKind,
    /// Horizontal center.
    pub h: f64,
    /// Vertical center.
    pub k: f64,
    /// Horizontal radius.
    pub a: f64,
    /// Vertical radius.
    pub b: f64,
    /// Angular speed.
    pub omega: f64,
    /// Parabola curvature.
    pub p: f64,
    /// Parabola speed.
    pub speed: f64,
    /// Velocity arrow scale.
    pub v_scale: f64,
    /// Acceleration arrow scale.
    pub a_scale: f64,
    /// Animation time step in seconds. Non-positive values fall back to the
    /// default step when animating.
    pub dt: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            path: PathKind::Ellipse,
            h: 0.0,
            k: 0.0,
            a: 3.0,
            b: 2.0,
            omega: 1.0,
            p: 0.25,
            speed: 1.0,
            v_scale: 1.0,
            a_scale: 0.3,
            dt: DEFAULT_DT,
        }
    }
}

impl Config {
    /// Platform location of the config file, if a home directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "curvelab").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Builds the effective configuration for a run.
    ///
    /// An explicit `--config` must exist; the default location is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the result
    /// fails [`Config::validate`].
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Applies CLI overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(page) = cli.page {
            self.ui.page = page;
        }
        if cli.force_color {
            self.ui.color = ColorMode::Always;
        } else if cli.no_color {
            self.ui.color = ColorMode::Never;
        }
        if cli.no_alt_screen {
            self.ui.alt_screen = false;
        }
        if let Some(fps) = cli.fps {
            self.ui.fps = fps;
        }
        if let Some(dt) = cli.dt {
            self.motion.dt = dt;
        }
    }

    /// Checks values no panel could recover from.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        let t = &self.transform;
        let m = &self.motion;
        let values = [
            ("transform.h", t.h),
            ("transform.k", t.k),
            ("transform.a", t.a),
            ("transform.b", t.b),
            ("transform.range_min", t.range_min),
            ("transform.range_max", t.range_max),
            ("motion.h", m.h),
            ("motion.k", m.k),
            ("motion.a", m.a),
            ("motion.b", m.b),
            ("motion.omega", m.omega),
            ("motion.p", m.p),
            ("motion.speed", m.speed),
            ("motion.v_scale", m.v_scale),
            ("motion.a_scale", m.a_scale),
            ("motion.dt", m.dt),
        ];
        if let Some((field, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field: *field });
        }

        if t.range_min >= t.range_max {
            return Err(ConfigError::EmptyRange {
                min: t.range_min,
                max: t.range_max,
            });
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config TOML.
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A numeric setting is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Dotted key of the setting.
        field: &'static str,
    },

    /// The transform view range is empty.
    #[error("transform.range_min must be less than transform.range_max (got {min} to {max})")]
    EmptyRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// Polling rate of zero.
    #[error("ui.fps must be at least 1")]
    ZeroFps,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn origin() -> &'static Path {
        Path::new("test.toml")
    }

    #[test]
    fn defaults_match_panel_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.page, Page::Transform);
        assert_eq!(config.transform.curve, CurveKind::Ellipse);
        assert_eq!((config.transform.a, config.transform.b), (3.0, 2.0));
        assert_eq!((config.transform.range_min, config.transform.range_max), (-6.0, 6.0));
        assert_eq!(config.motion.path, PathKind::Ellipse);
        assert_eq!(config.motion.a_scale, 0.3);
        assert_eq!(config.motion.dt, 0.03);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            "[transform]\ncurve = \"hyperbola\"\nbranch = \"left\"\n\n[motion]\nomega = 2.5\n",
            origin(),
        )
        .unwrap();
        assert_eq!(config.transform.curve, CurveKind::Hyperbola);
        assert_eq!(config.transform.branch, Branch::Left);
        assert_eq!(config.transform.a, 3.0);
        assert_eq!(config.motion.omega, 2.5);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[ui]\ntheme = \"dark\"\n", origin()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn validate_rejects_empty_range() {
        let mut config = Config::default();
        config.transform.range_min = 5.0;
        config.transform.range_max = 2.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRange { .. }));
    }

    #[test]
    fn validate_rejects_non_finite_and_zero_fps() {
        let mut config = Config::default();
        config.motion.omega = f64::NAN;
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "motion.omega must be a finite number"
        );

        let mut config = Config::default();
        config.ui.fps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroFps)));
    }

    #[test]
    fn non_positive_dt_is_allowed() {
        let mut config = Config::default();
        config.motion.dt = -1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\npage = \"help\"\nfps = 20\n\n[motion]\ndt = 0.1").unwrap();

        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "curvelab", "--config", path, "--page", "motion", "--dt", "0.05", "--no-color",
        ])
        .unwrap();
        let config = Config::resolve(&cli).unwrap();
        assert_eq!(config.ui.page, Page::Motion);
        assert_eq!(config.ui.fps, 20);
        assert_eq!(config.ui.color, ColorMode::Never);
        assert_eq!(config.motion.dt, 0.05);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let cli =
            Cli::try_parse_from(["curvelab", "--config", path.to_str().unwrap()]).unwrap();
        assert!(matches!(Config::resolve(&cli), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.transform.curve = CurveKind::Parabola;
        config.motion.path = PathKind::Parabola;
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("curve = \"parabola\""));
        assert_eq!(Config::from_toml_str(&text, origin()).unwrap(), config);
    }
}
