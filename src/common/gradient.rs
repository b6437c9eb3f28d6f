//! 連続反復回数をパレット位置へ写すパラメータ

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::GRADIENT_SCALE;
use super::error::Error;

/// パレット位置の倍率・ずらし量・対数変換フラグ
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gradient {
    pub scale: f64,
    pub shift: f64,
    pub log_index: bool,
}

impl Gradient {
    pub fn new(scale: f64, shift: f64, log_index: bool) -> Self {
        Self {
            scale,
            shift,
            log_index,
        }
    }

    /// 3つのフィールドすべてが等しいか
    pub fn equals(&self, other: &Gradient) -> bool {
        self.scale == other.scale && self.shift == other.shift && self.log_index == other.log_index
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(GRADIENT_SCALE, 0.0, false)
    }
}

impl FromStr for Gradient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [scale, shift, log_index] = tokens.as_slice() else {
            return Err(Error::ParseGradient(format!(
                "expected 3 fields, got {} in `{}`",
                tokens.len(),
                s
            )));
        };
        let number = |t: &str| {
            t.parse::<f64>()
                .map_err(|e| Error::ParseGradient(format!("`{}`: {}", t, e)))
        };
        let log_index = log_index
            .parse::<bool>()
            .map_err(|e| Error::ParseGradient(format!("`{}`: {}", log_index, e)))?;
        Ok(Gradient::new(number(*scale)?, number(*shift)?, log_index))
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.scale, self.shift, self.log_index)
    }
}

impl TryFrom<String> for Gradient {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Gradient> for String {
    fn from(gradient: Gradient) -> Self {
        gradient.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_form() {
        let gradient: Gradient = "1.5 -0.25 true".parse().unwrap();
        assert!(gradient.equals(&Gradient::new(1.5, -0.25, true)));
        assert_eq!(gradient.to_string(), "1.5 -0.25 true");
    }

    #[test]
    fn equality_covers_every_field() {
        let base = Gradient::new(2.0, 1.0, false);
        assert!(base.equals(&Gradient::new(2.0, 1.0, false)));
        assert!(!base.equals(&Gradient::new(3.0, 1.0, false)));
        assert!(!base.equals(&Gradient::new(2.0, 0.0, false)));
        assert!(!base.equals(&Gradient::new(2.0, 1.0, true)));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "1 2", "1 2 true 4", "x 0 false", "1 y false", "1 0 yes"] {
            assert!(
                matches!(text.parse::<Gradient>(), Err(Error::ParseGradient(_))),
                "accepted `{}`",
                text
            );
        }
    }
}
