//! Application Configuration
//!
//! Reads `firewatch.conf` (key=value, `#` comments) and turns it into the
//! settings of the detection session, the timelapse assembler, the camera
//! and the logger. Bad values are reported and replaced by their defaults.

use config_loader::{ConfigEntry, ConfigError};
use detection::{
    FireConfig, MotionConfig, Sensitivity, SessionConfig, TimelapseConfig, VideoFormat,
};
use logging::LogLevel;
use media::CameraConfig;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "firewatch.conf";
const CONFIG_DIRS: [&str; 3] = [".", "config", ".."];

/// Application configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Camera device index
    pub camera_device: i32,
    /// Frame rate requested from the camera
    pub camera_fps: f64,
    /// Initial slider position
    pub sensitivity: Sensitivity,
    pub tick_interval: Duration,
    pub capture_cooldown: Duration,
    pub motion: MotionConfig,
    pub fire: FireConfig,
    pub timelapse_fps: u32,
    pub timelapse_hold: Duration,
    pub timelapse_format: VideoFormat,
    /// Where timelapse files are written
    pub output_dir: PathBuf,
    /// Path to the log file
    pub log_path: PathBuf,
    /// Logging level
    pub log_level: LogLevel,
}

/// Outcome of [`AppConfig::load`], kept around so the problems can be
/// logged once the logger exists.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// File the values came from, `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigError>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        let timelapse = TimelapseConfig::default();
        let camera = CameraConfig::default();

        Self {
            camera_device: camera.device_id,
            camera_fps: camera.fps,
            sensitivity: session.sensitivity,
            tick_interval: session.tick_interval,
            capture_cooldown: session.capture_cooldown,
            motion: session.motion,
            fire: session.fire,
            timelapse_fps: timelapse.fps,
            timelapse_hold: timelapse.hold,
            timelapse_format: timelapse.format,
            output_dir: default_output_dir(),
            log_path: PathBuf::from("firewatch.log"),
            log_level: LogLevel::Info,
        }
    }
}

/// The user's download directory, or the working directory when the
/// platform has none.
fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_number<T: FromStr>(entry: &ConfigEntry) -> Result<T, ConfigError> {
    entry
        .value
        .parse()
        .map_err(|_| ConfigError::invalid_value(&entry.key, &entry.value, "expected a number"))
}

fn parse_positive_millis(entry: &ConfigEntry) -> Result<Duration, ConfigError> {
    match parse_number::<u64>(entry)? {
        0 => Err(ConfigError::invalid_value(
            &entry.key,
            &entry.value,
            "must be greater than zero",
        )),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn parse_positive_float(entry: &ConfigEntry) -> Result<f64, ConfigError> {
    let value: f64 = parse_number(entry)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::invalid_value(
            &entry.key,
            &entry.value,
            "must be a positive number",
        ))
    }
}

impl AppConfig {
    /// Searches `./firewatch.conf`, `./config/firewatch.conf` and
    /// `../firewatch.conf`. A missing file means defaults; an unreadable or
    /// malformed one means defaults plus a warning.
    pub fn load() -> LoadedConfig {
        match config_loader::find_and_parse(CONFIG_FILE_NAME, &CONFIG_DIRS) {
            Ok((path, entries)) => {
                let (config, warnings) = Self::from_entries(&entries);
                LoadedConfig {
                    config,
                    source: Some(path),
                    warnings,
                }
            }
            Err(ConfigError::FileNotFound(_)) => LoadedConfig {
                config: Self::default(),
                source: None,
                warnings: Vec::new(),
            },
            Err(e) => LoadedConfig {
                config: Self::default(),
                source: None,
                warnings: vec![e],
            },
        }
    }

    /// Loads one specific file.
    pub fn load_from_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
        let content = config_loader::load_config_file(path)?;
        let entries = config_loader::parse_entries(&content)?;
        let (config, warnings) = Self::from_entries(&entries);
        Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            warnings,
        })
    }

    /// Applies entries over the defaults. Later entries win; every entry
    /// that cannot be applied yields a warning and leaves the field alone.
    pub fn from_entries(entries: &[ConfigEntry]) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        for entry in entries {
            if let Err(e) = config.apply(entry) {
                warnings.push(e);
            }
        }
        if let Err(e) = config.check_timelapse_hold() {
            warnings.push(e);
        }

        (config, warnings)
    }

    /// Every still must stay on screen for at least one encoder frame.
    /// Runs once both timelapse keys are known; a hold that is too short
    /// falls back to the default, or to one frame if that is too short too.
    fn check_timelapse_hold(&mut self) -> Result<(), ConfigError> {
        let frame = Duration::from_secs(1) / self.timelapse_fps.max(1);
        if self.timelapse_hold >= frame {
            return Ok(());
        }

        let rejected = self.timelapse_hold;
        self.timelapse_hold = TimelapseConfig::default().hold.max(frame);
        Err(ConfigError::invalid_value(
            "timelapse_hold_ms",
            &rejected.as_millis().to_string(),
            format!(
                "must be at least one frame ({} ms at {} fps)",
                frame.as_millis(),
                self.timelapse_fps
            ),
        ))
    }

    fn apply(&mut self, entry: &ConfigEntry) -> Result<(), ConfigError> {
        match entry.key.as_str() {
            "camera_device" => {
                let device: i32 = parse_number(entry)?;
                if device < 0 {
                    return Err(ConfigError::invalid_value(
                        &entry.key,
                        &entry.value,
                        "must not be negative",
                    ));
                }
                self.camera_device = device;
            }
            "camera_fps" => self.camera_fps = parse_positive_float(entry)?,
            "sensitivity" => self.sensitivity = Sensitivity::new(parse_number(entry)?),
            "tick_interval_ms" => self.tick_interval = parse_positive_millis(entry)?,
            "capture_cooldown_ms" => {
                self.capture_cooldown = Duration::from_millis(parse_number(entry)?)
            }
            "motion_pixel_threshold" => {
                let threshold: u32 = parse_number(entry)?;
                if threshold > 765 {
                    return Err(ConfigError::invalid_value(
                        &entry.key,
                        &entry.value,
                        "must be at most 765 (3 x 255)",
                    ));
                }
                self.motion.pixel_diff_threshold = threshold;
            }
            "motion_divisor" => self.motion.divisor = parse_positive_float(entry)?,
            "fire_min_ratio" => {
                let ratio: f64 = parse_number(entry)?;
                if !(0.0..1.0).contains(&ratio) {
                    return Err(ConfigError::invalid_value(
                        &entry.key,
                        &entry.value,
                        "must be in [0, 1)",
                    ));
                }
                self.fire.min_ratio = ratio;
            }
            "timelapse_fps" => {
                let fps: u32 = parse_number(entry)?;
                if fps == 0 {
                    return Err(ConfigError::invalid_value(
                        &entry.key,
                        &entry.value,
                        "must be greater than zero",
                    ));
                }
                self.timelapse_fps = fps;
            }
            "timelapse_hold_ms" => self.timelapse_hold = parse_positive_millis(entry)?,
            "timelapse_codec" => {
                self.timelapse_format = entry
                    .value
                    .parse()
                    .map_err(|reason: String| {
                        ConfigError::invalid_value(&entry.key, &entry.value, reason)
                    })?
            }
            "output_dir" => {
                if entry.value.is_empty() {
                    return Err(ConfigError::invalid_value(
                        &entry.key,
                        &entry.value,
                        "must not be empty",
                    ));
                }
                self.output_dir = PathBuf::from(&entry.value);
            }
            "log_path" => self.log_path = PathBuf::from(&entry.value),
            "log_level" => {
                self.log_level = entry.value.parse().map_err(|e: logging::LoggingError| {
                    ConfigError::invalid_value(&entry.key, &entry.value, e.to_string())
                })?
            }
            _ => {
                return Err(ConfigError::invalid_value(
                    &entry.key,
                    &entry.value,
                    "unknown key, ignored",
                ));
            }
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            sensitivity: self.sensitivity,
            tick_interval: self.tick_interval,
            capture_cooldown: self.capture_cooldown,
            fire: self.fire,
            motion: self.motion,
        }
    }

    pub fn timelapse_config(&self) -> TimelapseConfig {
        TimelapseConfig {
            fps: self.timelapse_fps,
            hold: self.timelapse_hold,
            format: self.timelapse_format,
            output_dir: self.output_dir.clone(),
        }
    }

    /// Values were validated on load, so a rejection here only happens for
    /// hand-built configs and falls back to the default camera.
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig::new(self.camera_device, self.camera_fps).unwrap_or_default()
    }
}
