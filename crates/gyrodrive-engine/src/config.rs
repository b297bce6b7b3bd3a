//! Game configuration
//!
//! Every tunable constant lives here. Defaults reproduce the reference
//! handling: a 1920x1080 surface, a road half the screen wide, 10-sample
//! smoothing and a two second calibration window.

use gyrodrive_calibration::CalibrationSettings;
use gyrodrive_errors::{GyroDriveError, ValidationError, require, validate, validate_range};
use gyrodrive_filters::MAX_WINDOW;
use gyrodrive_telemetry_streams::{
    ChannelLayout, ChannelVariant, DEFAULT_HEADER_MARKER, DEFAULT_MAX_RESIDUAL,
};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub road: RoadConfig,
    pub car: CarConfig,
    pub obstacle: ObstacleConfig,
    pub telemetry: TelemetryConfig,
    pub calibration: CalibrationSettings,
    pub smoothing: SmoothingConfig,
    pub motion: MotionConfig,
}

/// Render surface size reported by the renderer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Road width as a fraction of screen width; the road is centred.
    pub width_fraction: f64,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub width_fraction: f64,
    pub height_fraction: f64,
    /// Gap between the car and the bottom edge, as a fraction of screen height.
    pub bottom_margin_fraction: f64,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.0625,
            height_fraction: 0.166,
            bottom_margin_fraction: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width_fraction: f64,
    pub height_fraction: f64,
    /// Seconds between spawns.
    pub spawn_interval_secs: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.0625,
            height_fraction: 0.133,
            spawn_interval_secs: 2.0,
        }
    }
}

/// Sensor stream format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Substring that marks the logger's header line.
    pub header_marker: String,
    pub channels: ChannelLayout,
    pub variant: ChannelVariant,
    /// Cap on a buffered partial record.
    pub max_residual_bytes: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
            channels: ChannelLayout::default(),
            variant: ChannelVariant::default(),
            max_residual_bytes: DEFAULT_MAX_RESIDUAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub window: usize,
    /// Symmetric bound on the filtered signal.
    pub limit: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 10,
            limit: 10.0,
        }
    }
}

/// Motion and camera constants. Rates are per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Lateral pixels per second per unit of steering signal.
    pub steering_scale: f64,
    /// Zoom change per second per unit of zoom signal.
    pub zoom_speed: f64,
    pub min_zoom: f64,
    /// Largest zoom-out; also sizes the road's vertical extent.
    pub max_zoom: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub initial_speed: f64,
    /// Speed signal magnitude below which speed is held.
    pub speed_dead_band: f64,
    /// Speed signal magnitude treated as full throttle or full brake.
    pub speed_full_scale: f64,
    pub acceleration: f64,
    pub deceleration: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steering_scale: 200.0,
            zoom_speed: 0.1,
            min_zoom: 0.5,
            max_zoom: 2.0,
            min_speed: 150.0,
            max_speed: 900.0,
            initial_speed: 300.0,
            speed_dead_band: 0.5,
            speed_full_scale: 10.0,
            acceleration: 300.0,
            deceleration: 300.0,
        }
    }
}

impl GameConfig {
    /// Parse a YAML document layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GyroDriveError::Config`] for malformed YAML and
    /// [`GyroDriveError::Validation`] when the values are inconsistent.
    pub fn from_yaml_str(text: &str) -> Result<Self, GyroDriveError> {
        let config: GameConfig = if text.trim().is_empty() {
            GameConfig::default()
        } else {
            serde_yaml::from_str(text)
                .map_err(|e| GyroDriveError::config(format!("invalid YAML: {e}")))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found. Non-finite values never
    /// satisfy a range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_range!("screen.width", self.screen.width, f64::MIN_POSITIVE, f64::MAX);
        validate_range!("screen.height", self.screen.height, f64::MIN_POSITIVE, f64::MAX);

        validate_range!("road.width_fraction", self.road.width_fraction, f64::MIN_POSITIVE, 1.0);
        validate_range!("car.width_fraction", self.car.width_fraction, f64::MIN_POSITIVE, 1.0);
        validate_range!("car.height_fraction", self.car.height_fraction, f64::MIN_POSITIVE, 1.0);
        validate_range!("car.bottom_margin_fraction", self.car.bottom_margin_fraction, 0.0, 1.0);
        validate_range!(
            "obstacle.width_fraction",
            self.obstacle.width_fraction,
            f64::MIN_POSITIVE,
            1.0
        );
        validate_range!(
            "obstacle.height_fraction",
            self.obstacle.height_fraction,
            f64::MIN_POSITIVE,
            1.0
        );
        validate_range!(
            "obstacle.spawn_interval_secs",
            self.obstacle.spawn_interval_secs,
            f64::MIN_POSITIVE,
            f64::MAX
        );

        validate!(
            self.car.width_fraction <= self.road.width_fraction,
            ValidationError::constraint("car.width_fraction must not exceed road.width_fraction")
        );
        validate!(
            self.obstacle.width_fraction <= self.road.width_fraction,
            ValidationError::constraint(
                "obstacle.width_fraction must not exceed road.width_fraction"
            )
        );
        validate!(
            self.car.height_fraction + self.car.bottom_margin_fraction <= 1.0,
            ValidationError::constraint(
                "car does not fit on screen with the configured bottom margin"
            )
        );

        validate!(
            !self.telemetry.header_marker.trim().is_empty(),
            require!("telemetry.header_marker")
        );
        validate_range!(
            "telemetry.max_residual_bytes",
            self.telemetry.max_residual_bytes,
            1,
            usize::MAX
        );

        validate_range!(
            "calibration.duration_secs",
            self.calibration.duration_secs,
            f64::MIN_POSITIVE,
            f64::MAX
        );
        validate_range!("calibration.max_samples", self.calibration.max_samples, 1, usize::MAX);

        validate_range!("smoothing.window", self.smoothing.window, 1, MAX_WINDOW);
        validate_range!("smoothing.limit", self.smoothing.limit, f64::MIN_POSITIVE, f64::MAX);

        let m = &self.motion;
        validate_range!("motion.steering_scale", m.steering_scale, f64::MIN, f64::MAX);
        validate_range!("motion.zoom_speed", m.zoom_speed, f64::MIN, f64::MAX);
        validate_range!("motion.min_zoom", m.min_zoom, f64::MIN_POSITIVE, f64::MAX);
        validate_range!("motion.max_zoom", m.max_zoom, f64::MIN_POSITIVE, f64::MAX);
        validate!(
            m.min_zoom <= m.max_zoom,
            ValidationError::constraint("motion.min_zoom must not exceed motion.max_zoom")
        );
        validate!(
            m.min_zoom <= 1.0 && m.max_zoom >= 1.0,
            ValidationError::constraint(
                "the default zoom of 1.0 must lie within [motion.min_zoom, motion.max_zoom]"
            )
        );
        validate_range!("motion.min_speed", m.min_speed, 0.0, f64::MAX);
        validate_range!("motion.max_speed", m.max_speed, f64::MIN_POSITIVE, f64::MAX);
        validate!(
            m.min_speed <= m.max_speed,
            ValidationError::constraint("motion.min_speed must not exceed motion.max_speed")
        );
        validate_range!("motion.initial_speed", m.initial_speed, m.min_speed, m.max_speed);
        validate_range!("motion.speed_dead_band", m.speed_dead_band, 0.0, f64::MAX);
        validate_range!(
            "motion.speed_full_scale",
            m.speed_full_scale,
            f64::MIN_POSITIVE,
            f64::MAX
        );
        validate_range!("motion.acceleration", m.acceleration, 0.0, f64::MAX);
        validate_range!("motion.deceleration", m.deceleration, 0.0, f64::MAX);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_yaml_overrides_only_named_fields() -> Result<(), Box<dyn std::error::Error>> {
        let config = GameConfig::from_yaml_str(
            "screen:\n  width: 1280\n  height: 720\nmotion:\n  steering_scale: 150\ntelemetry:\n  variant: minimal\n",
        )?;
        assert!((config.screen.width - 1280.0).abs() < f64::EPSILON);
        assert!((config.motion.steering_scale - 150.0).abs() < f64::EPSILON);
        assert!((config.motion.zoom_speed - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.telemetry.variant, ChannelVariant::Minimal);
        assert_eq!(config.telemetry.channels.steering, 27);
        Ok(())
    }

    #[test]
    fn test_empty_yaml_is_default() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(GameConfig::from_yaml_str("")?, GameConfig::default());
        Ok(())
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = GameConfig::from_yaml_str("screen: [1, 2");
        assert!(matches!(err, Err(GyroDriveError::Config(_))));
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let mut config = GameConfig::default();
        config.motion.min_zoom = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = GameConfig::default();
        config.smoothing.window = 0;
        assert!(config.validate().is_err());
        config.smoothing.window = MAX_WINDOW + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut config = GameConfig::default();
        config.screen.width = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_speed_must_be_in_bounds() {
        let mut config = GameConfig::default();
        config.motion.initial_speed = 1000.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_calibration_samples_rejected() {
        let mut config = GameConfig::default();
        config.calibration.max_samples = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_calibration_duration_rejected() {
        let mut config = GameConfig::default();
        config.calibration.duration_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "calibration.duration_secs"
        ));
        config.calibration.duration_secs = -1.0;
        assert!(config.validate().is_err());
        config.calibration.duration_secs = 0.25;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let mut config = GameConfig::default();
        config.motion.steering_scale = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.smoothing.limit = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_header_marker_rejected() {
        let mut config = GameConfig::default();
        config.telemetry.header_marker = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ValidationError::required("telemetry.header_marker"))
        );
    }
}
