use std::path::PathBuf;

use anyhow::{Context, ensure};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use striker_control::Thresholds;
use striker_geometry::Point2D;
use striker_vision::{ColorRange, Connectivity, DetectorConfig, FieldWarp};
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
/// Environment variable that replaces [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "STRIKER_CONFIG";
const ENV_PREFIX: &str = "STRIKER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub frames: FrameSettings,
    pub markers: MarkerSettings,
    pub strategy: StrategySettings,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub warp: Option<WarpSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameSettings {
    /// Directory scanned for frame images.
    pub dir: PathBuf,
    /// Control period in milliseconds.
    pub period_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Raw per-channel bounds as written in the settings file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ColorBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
    #[serde(default)]
    pub order: ChannelOrder,
}

impl ColorBounds {
    pub fn range(&self) -> Result<ColorRange, striker_vision::VisionError> {
        match self.order {
            ChannelOrder::Rgb => ColorRange::new(self.lower, self.upper),
            ChannelOrder::Bgr => ColorRange::from_bgr(self.lower, self.upper),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    Four,
    #[default]
    Eight,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkerSettings {
    pub front: ColorBounds,
    pub back: ColorBounds,
    pub ball: ColorBounds,
    pub goal: ColorBounds,
    #[serde(default = "default_min_area")]
    pub min_area: u32,
    #[serde(default)]
    pub connectivity: Adjacency,
}

fn default_min_area() -> u32 {
    1
}

/// Validated color ranges for every tracked object.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRanges {
    pub front: ColorRange,
    pub back: ColorRange,
    pub ball: ColorRange,
    pub goal: ColorRange,
}

impl MarkerSettings {
    pub fn ranges(&self) -> anyhow::Result<MarkerRanges> {
        let range = |name: &str, bounds: &ColorBounds| {
            bounds
                .range()
                .with_context(|| format!("invalid color range for marker '{name}'"))
        };
        Ok(MarkerRanges {
            front: range("front", &self.front)?,
            back: range("back", &self.back)?,
            ball: range("ball", &self.ball)?,
            goal: range("goal", &self.goal)?,
        })
    }

    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            connectivity: match self.connectivity {
                Adjacency::Four => Connectivity::Four,
                Adjacency::Eight => Connectivity::Eight,
            },
            min_area: self.min_area,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StrategySettings {
    /// Distance from the ball to the shooting point, along the ball/goal line.
    pub extension: f64,
    #[serde(default)]
    pub from_goal_side: bool,
}

/// Camera-to-pitch rectification.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WarpSettings {
    pub src: [Point2D; 4],
    pub dst: [Point2D; 4],
    pub width: u32,
    pub height: u32,
}

impl WarpSettings {
    pub fn field_warp(&self) -> anyhow::Result<FieldWarp> {
        ensure!(self.width > 0 && self.height > 0, "warp output size must be non-zero");
        FieldWarp::from_quads(self.src, self.dst).context("invalid warp control points")
    }
}

impl Settings {
    /// Parses settings from TOML text, without environment overrides.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Self::from_builder(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let settings: Settings = builder
            .build()?
            .try_deserialize()
            .context("configuration does not match the expected layout")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.frames.period_ms > 0, "frames.period_ms must be positive");
        ensure!(
            self.strategy.extension.is_finite() && self.strategy.extension >= 0.0,
            "strategy.extension must be a non-negative number"
        );
        ensure!(
            self.thresholds.rotation_deg >= 0.0 && self.thresholds.distance >= 0.0,
            "thresholds must be non-negative"
        );
        self.markers.ranges()?;
        if let Some(warp) = &self.warp {
            warp.field_warp()?;
        }
        Ok(())
    }
}

/// Loads settings from `$STRIKER_CONFIG` (or [`DEFAULT_CONFIG_PATH`]), then applies
/// `STRIKER_<SECTION>__<KEY>` environment overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Attempting to load configuration from {}", path);

    let builder = Config::builder()
        .add_source(File::new(&path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    match Settings::from_builder(builder) {
        Ok(settings) => {
            info!(?settings, "Successfully loaded configuration");
            Ok(settings)
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            Err(e.context(format!("loading {path}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [frames]
        dir = "frames"
        period_ms = 50

        [markers]
        front = { lower = [200, 0, 0], upper = [255, 60, 60] }
        back = { lower = [0, 0, 200], upper = [60, 60, 255] }
        ball = { lower = [200, 100, 0], upper = [255, 180, 60] }
        goal = { lower = [200, 200, 0], upper = [255, 255, 80] }

        [strategy]
        extension = 10.0
    "#;

    #[test]
    fn test_minimal_settings_use_defaults() {
        let settings = Settings::from_toml(MINIMAL).unwrap();
        assert_eq!(settings.frames.period_ms, 50);
        assert_eq!(settings.markers.min_area, 1);
        assert_eq!(settings.markers.connectivity, Adjacency::Eight);
        assert!(!settings.strategy.from_goal_side);
        assert_eq!(settings.thresholds, Thresholds::default());
        assert!(settings.warp.is_none());

        let ranges = settings.markers.ranges().unwrap();
        assert_eq!(ranges.back.lower(), [0, 0, 200]);
    }

    #[test]
    fn test_shipped_defaults_parse() {
        let settings = Settings::from_toml(include_str!("../config/default.toml")).unwrap();
        assert_eq!(settings.frames.period_ms, 50);
        assert_eq!(settings.markers.detector().min_area, 4);
        assert_eq!(settings.thresholds, Thresholds::new(30.0, 50.0));
    }

    #[test]
    fn test_bgr_bounds_are_reordered() {
        let text = MINIMAL.replace(
            "ball = { lower = [200, 100, 0], upper = [255, 180, 60] }",
            r#"ball = { lower = [0, 100, 200], upper = [60, 180, 255], order = "bgr" }"#,
        );
        let settings = Settings::from_toml(&text).unwrap();
        let ball = settings.markers.ranges().unwrap().ball;
        assert_eq!(ball.lower(), [200, 100, 0]);
        assert_eq!(ball.upper(), [255, 180, 60]);
    }

    #[test]
    fn test_inverted_color_range_is_rejected() {
        let text = MINIMAL.replace("goal = { lower = [200, 200, 0]", "goal = { lower = [255, 255, 255]");
        let err = Settings::from_toml(&text).unwrap_err();
        assert!(format!("{err:#}").contains("marker 'goal'"), "unexpected error: {err:#}");
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let text = MINIMAL.replace("[strategy]\n        extension = 10.0", "");
        assert!(Settings::from_toml(&text).is_err());
    }

    #[test]
    fn test_zero_period_is_rejected() {
        let text = MINIMAL.replace("period_ms = 50", "period_ms = 0");
        assert!(Settings::from_toml(&text).is_err());
    }

    #[test]
    fn test_full_settings() {
        let text = format!(
            "{MINIMAL}\n{}",
            r#"
            [thresholds]
            rotation_deg = 15.0
            distance = 20.0

            [warp]
            src = [{ x = 0.0, y = 0.0 }, { x = 10.0, y = 0.0 }, { x = 10.0, y = 10.0 }, { x = 0.0, y = 10.0 }]
            dst = [{ x = 0.0, y = 0.0 }, { x = 20.0, y = 0.0 }, { x = 20.0, y = 20.0 }, { x = 0.0, y = 20.0 }]
            width = 20
            height = 20
            "#
        );
        let settings = Settings::from_toml(&text).unwrap();
        assert_eq!(settings.thresholds, Thresholds::new(15.0, 20.0));

        let warp = settings.warp.unwrap();
        assert_eq!((warp.width, warp.height), (20, 20));
        let mapped = warp.field_warp().unwrap().map_point(Point2D::new(5.0, 5.0));
        assert!(mapped.distance_to(Point2D::new(10.0, 10.0)) < 1e-3);
    }

    #[test]
    fn test_collinear_warp_is_rejected() {
        let text = format!(
            "{MINIMAL}\n{}",
            r#"
            [warp]
            src = [{ x = 0.0, y = 0.0 }, { x = 1.0, y = 1.0 }, { x = 2.0, y = 2.0 }, { x = 3.0, y = 3.0 }]
            dst = [{ x = 0.0, y = 0.0 }, { x = 20.0, y = 0.0 }, { x = 20.0, y = 20.0 }, { x = 0.0, y = 20.0 }]
            width = 20
            height = 20
            "#
        );
        assert!(Settings::from_toml(&text).is_err());
    }
}
