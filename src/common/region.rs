//! 複素平面上の描画領域

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::error::Error;

/// 描画する矩形領域。
///
/// 角の2点で与える形式と、中心と全幅・全高で与える形式がある。
/// 描画前に [`Region::to_corners`] で角の形式へ正規化する。
/// `min <= max` は検証しない（反転した領域はそのまま反転した画像になる）。
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Corners { min: Complex64, max: Complex64 },
    OriginAndExtents { origin: Complex64, extents: Complex64 },
}

impl Region {
    /// フラグ付きの (min, max) 表現から作る
    pub fn new(min: Complex64, max: Complex64, origin_and_width: bool) -> Self {
        if origin_and_width {
            Region::OriginAndExtents {
                origin: min,
                extents: max,
            }
        } else {
            Region::Corners { min, max }
        }
    }

    /// 角の形式へ変換する。すでに角の形式ならそのまま返す。
    pub fn to_corners(self) -> Self {
        let (min, max) = self.corners();
        Region::Corners { min, max }
    }

    /// 正規化した (min, max)
    pub fn corners(self) -> (Complex64, Complex64) {
        match self {
            Region::Corners { min, max } => (min, max),
            Region::OriginAndExtents { origin, extents } => {
                let half = extents / 2.0;
                (origin - half, origin + half)
            }
        }
    }

    fn encoded(self) -> (Complex64, Complex64, bool) {
        match self {
            Region::Corners { min, max } => (min, max, false),
            Region::OriginAndExtents { origin, extents } => (origin, extents, true),
        }
    }
}

fn parse_point(token: &str) -> Result<Complex64, Error> {
    let (re, im) = token
        .split_once(',')
        .ok_or_else(|| Error::ParseRegion(format!("expected `re,im`, got `{}`", token)))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| Error::ParseRegion(format!("`{}`: {}", s, e)))
    };
    Ok(Complex64::new(parse(re)?, parse(im)?))
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [min, max, flag] = tokens.as_slice() else {
            return Err(Error::ParseRegion(format!(
                "expected 3 fields, got {} in `{}`",
                tokens.len(),
                s
            )));
        };
        let origin_and_width = flag
            .parse::<bool>()
            .map_err(|e| Error::ParseRegion(format!("`{}`: {}", flag, e)))?;
        Ok(Region::new(parse_point(min)?, parse_point(max)?, origin_and_width))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, flag) = self.encoded();
        write!(f, "{},{} {},{} {}", a.re, a.im, b.re, b.im, flag)
    }
}

impl TryFrom<String> for Region {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.to_string()
    }
}
