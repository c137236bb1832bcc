//! Viewer configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`R2_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use r2_math::{deg_to_rad, Quat, Vec3};
use r2_term::TermColor;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera placement and projection
    #[serde(default)]
    pub camera: CameraConfig,
    /// Model orientation and animation
    #[serde(default)]
    pub model: ModelConfig,
    /// Terminal output
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`R2_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // R2_VIEWER__TITLE=Test -> viewer.title = "Test"
        figment = figment.merge(Env::prefixed("R2_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the viewer cannot draw with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewer.columns < 2 || self.viewer.rows < 2 {
            return Err(ConfigError::invalid(format!(
                "viewer grid must be at least 2x2, got {}x{}",
                self.viewer.columns, self.viewer.rows
            )));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return Err(ConfigError::invalid(format!(
                "camera needs 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        if self.camera.fov <= 0.0 || self.camera.fov >= 180.0 {
            return Err(ConfigError::invalid(format!(
                "camera fov must be in (0, 180) degrees, got {}",
                self.camera.fov
            )));
        }
        Ok(())
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position [x, y, z]
    pub eye: [f32; 3],
    /// Point the camera looks at [x, y, z]
    pub target: [f32; 3],
    /// World up direction [x, y, z]
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.5, 4.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::from(self.eye)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from(self.target)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from(self.up)
    }

    pub fn fov_radians(&self) -> f32 {
        deg_to_rad(self.fov)
    }
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Edge length of the cube
    pub size: f32,
    /// Spin per frame as Euler angles [roll, pitch, yaw] in degrees
    pub spin: [f32; 3],
    /// Fixed tilt axis applied after the spin
    pub tilt_axis: [f32; 3],
    /// Tilt angle in degrees
    pub tilt_angle: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            spin: [0.0, 3.0, 1.5],
            tilt_axis: [1.0, 0.0, 0.0],
            tilt_angle: 20.0,
        }
    }
}

impl ModelConfig {
    /// Spin accumulated after `frame` frames
    pub fn spin_at(&self, frame: u32) -> Quat {
        let n = frame as f32;
        Quat::from_euler_degrees(self.spin[0] * n, self.spin[1] * n, self.spin[2] * n)
    }

    pub fn tilt(&self) -> Quat {
        let axis = Vec3::from(self.tilt_axis).normalized();
        Quat::from_axis_angle(axis, deg_to_rad(self.tilt_angle))
    }
}

/// Terminal viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Title drawn centred above the frame
    pub title: String,
    /// Grid width in character cells
    pub columns: u16,
    /// Grid height in character cells
    pub rows: u16,
    /// Frames to draw before exiting
    pub frames: u32,
    /// Pause between frames in milliseconds
    pub frame_delay_ms: u64,
    /// Character used for edges
    pub glyph: char,
    /// Character used for cube corners
    pub corner_glyph: char,
    /// Edge color
    pub glyph_color: TermColor,
    /// Height of a character cell relative to its width
    pub cell_aspect: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "r2 \u{2022} spinning cube".to_string(),
            columns: 72,
            rows: 28,
            frames: 240,
            frame_delay_ms: 33,
            glyph: '#',
            corner_glyph: '@',
            glyph_color: TermColor::Cyan,
            cell_aspect: 2.0,
        }
    }
}

impl ViewerConfig {
    /// Aspect ratio of the grid in screen space
    pub fn aspect(&self) -> f32 {
        let rows = f32::from(self.rows) * self.cell_aspect;
        if rows <= 0.0 {
            return 1.0;
        }
        f32::from(self.columns) / rows
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.viewer.columns, 72);
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.viewer.glyph_color, TermColor::Cyan);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("glyph_color = \"cyan\""));
        assert!(toml.contains("tilt_angle"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [viewer]
            glyph = "*"
            glyph_color = "red"
            "#,
        )
        .unwrap();
        assert_eq!(config.viewer.glyph, '*');
        assert_eq!(config.viewer.glyph_color, TermColor::Red);
        assert_eq!(config.viewer.columns, 72);
        assert_eq!(config.camera.far, 100.0);
    }

    #[test]
    fn test_validate_rejects_bad_planes() {
        let mut config = AppConfig::default();
        config.camera.near = 5.0;
        config.camera.far = 1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("near < far"));

        let mut config = AppConfig::default();
        config.viewer.rows = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spin_accumulates() {
        let model = ModelConfig {
            spin: [0.0, 0.0, 90.0],
            ..ModelConfig::default()
        };
        assert!(model.spin_at(0).approx_eq(Quat::IDENTITY));

        let v = model.spin_at(1).rotate_vector(Vec3::X);
        assert!((v - Vec3::Y).length() < 1e-5, "got {:?}", v);
    }

    #[test]
    fn test_aspect() {
        let viewer = ViewerConfig {
            columns: 80,
            rows: 20,
            cell_aspect: 2.0,
            ..ViewerConfig::default()
        };
        assert_eq!(viewer.aspect(), 2.0);
    }
}
