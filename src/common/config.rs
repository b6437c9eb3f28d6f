//! 設定ファイル（TOML）

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::colors::{default_stops, generate_palette, ColorStop, Palette};
use super::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, PALETTE_SIZE};
use super::error::Result;
use super::gradient::Gradient;
use super::mandelbrot::RenderSettings;
use super::region::Region;

/// 描画設定。ファイルにない項目は既定値になる。
///
/// ```toml
/// width = 800
/// height = 600
/// region = "-0.75,0 3.5,2 true"
/// gradient = "32 0 false"
///
/// [[colors]]
/// position = 0.0
/// color = [0, 7, 100]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub max_iteration: u32,
    pub bailout: f64,
    /// パレットの色数
    pub palette_size: usize,
    /// "<minRe>,<minIm> <maxRe>,<maxIm> <originAndWidth>"
    pub region: Region,
    /// "<scale> <shift> <logIndex>"
    pub gradient: Gradient,
    pub colors: Vec<ColorStop>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iteration: settings.max_iteration,
            bailout: settings.bailout,
            palette_size: PALETTE_SIZE,
            region: settings.region,
            gradient: settings.gradient,
            colors: default_stops(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_settings(&self) -> RenderSettings {
        RenderSettings {
            region: self.region,
            max_iteration: self.max_iteration,
            bailout: self.bailout,
            gradient: self.gradient,
        }
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::new(generate_palette(&self.colors, self.palette_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use num_complex::Complex64;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn reads_text_forms() {
        let config = Config::from_toml_str(
            r#"
            width = 320
            max_iteration = 250
            region = "0,0 4,2 true"
            gradient = "8 0.5 true"

            [[colors]]
            position = 0.0
            color = [0, 0, 0]

            [[colors]]
            position = 1.0
            color = [255, 255, 255]
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 320);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.region.corners().0, Complex64::new(-2.0, -1.0));
        assert!(config.gradient.equals(&Gradient::new(8.0, 0.5, true)));
        assert_eq!(config.colors.len(), 2);

        let settings = config.to_settings();
        assert_eq!(settings.max_iteration, 250);
        assert_eq!(config.palette().unwrap().len(), PALETTE_SIZE);
    }

    #[test]
    fn malformed_region_is_an_error() {
        let err = Config::from_toml_str(r#"region = "0,0 4,2""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("invalid region"));
    }

    #[test]
    fn zero_palette_size_is_an_error() {
        let config = Config {
            palette_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.palette(), Err(Error::EmptyPalette)));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
