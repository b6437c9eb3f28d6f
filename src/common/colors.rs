//! カラーマップと色変換関数

use image::Rgb;
use log::debug;
use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_COLORS;
use super::error::{Error, Result};
use super::interpolate::{Extrapolation, MonotoneCubic};

/// パレットの制御点（位置と色）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: [u8; 3],
}

impl ColorStop {
    pub fn new(position: f64, color: [u8; 3]) -> Self {
        Self { position, color }
    }
}

/// 既定のカラーマップの制御点
pub fn default_stops() -> Vec<ColorStop> {
    DEFAULT_COLORS
        .iter()
        .map(|&(position, color)| ColorStop::new(position, color))
        .collect()
}

/// 固定長の色テーブル。補間のために末尾と先頭はつながっているものとして扱う。
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// 1色以上の色列から作る
    pub fn new(colors: Vec<Rgb<u8>>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// 色数。`new` が空の色列を拒むので常に1以上。
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn get(&self, i: usize) -> Option<Rgb<u8>> {
        self.colors.get(i).copied()
    }

    /// 正規化済みの位置 `index` の色を隣の色と `bias` で混ぜる
    pub fn blend(&self, index: f64, bias: f64) -> Rgb<u8> {
        let len = self.colors.len();
        let i = index.floor() as usize % len;
        lerp(self.colors[i], self.colors[(i + 1) % len], bias)
    }
}

/// 2色の線形補間。NaN は 0、無限大は 1 として扱う。
///
/// `a + (b - a)·bias` の形で計算するので、`bias` が [0, 1] なら結果は
/// 必ず2色の間に収まる（`a·(1−bias) + b·bias` では同じ色どうしでも
/// 切り捨てで1小さくなることがある）。
pub fn lerp(from: Rgb<u8>, to: Rgb<u8>, bias: f64) -> Rgb<u8> {
    let bias = if bias.is_nan() {
        0.0
    } else if bias.is_infinite() {
        1.0
    } else {
        bias
    };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * bias) as u8;
    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}

/// 制御点を RGB 各チャンネルごとに単調3次補間し、`count` 色のパレットを作る
pub fn generate_palette(stops: &[ColorStop], count: usize) -> Result<Vec<Rgb<u8>>> {
    let xs: Vec<f64> = stops.iter().map(|s| s.position).collect();
    let channel = |c: usize| -> Result<_> {
        let ys: Vec<f64> = stops.iter().map(|s| s.color[c] as f64 / 255.0).collect();
        Ok(MonotoneCubic::new(&xs, &ys, Extrapolation::None)?.into_fn())
    };
    let (red, green, blue) = (channel(0)?, channel(1)?, channel(2)?);

    let to_u8 = |v: f64| (v.abs() * 255.0).clamp(0.0, 255.0) as u8;
    let colors: Vec<Rgb<u8>> = (0..count)
        .map(|i| {
            let x = i as f64 / count as f64;
            Rgb([to_u8(red(x)), to_u8(green(x)), to_u8(blue(x))])
        })
        .collect();

    debug!("パレット生成: 制御点 {} 個 → {} 色", stops.len(), colors.len());
    Ok(colors)
}

/// RGB を u32 形式 (0xRRGGBB) に変換
pub fn to_u32(color: Rgb<u8>) -> u32 {
    let [r, g, b] = color.0;
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb<u8> = Rgb([10, 200, 30]);
    const B: Rgb<u8> = Rgb([250, 0, 30]);

    fn close(a: Rgb<u8>, b: [u8; 3]) -> bool {
        a.0.iter().zip(b).all(|(&x, y)| (x as i32 - y as i32).abs() <= 1)
    }

    #[test]
    fn palette_has_requested_length() {
        let stops = default_stops();
        for n in [1, 2, 7, 256, 768] {
            assert_eq!(generate_palette(&stops, n).unwrap().len(), n);
        }
    }

    #[test]
    fn palette_from_no_stops_is_black() {
        let colors = generate_palette(&[], 4).unwrap();
        assert!(colors.iter().all(|&c| c == Rgb([0, 0, 0])));
    }

    #[test]
    fn palette_matches_stops() {
        let stops = [
            ColorStop::new(0.0, [0, 7, 100]),
            ColorStop::new(0.25, [32, 107, 203]),
            ColorStop::new(0.5, [237, 255, 255]),
            ColorStop::new(0.75, [255, 170, 0]),
        ];
        let colors = generate_palette(&stops, 768).unwrap();
        for (i, stop) in [0, 192, 384, 576].into_iter().zip(&stops) {
            assert!(
                close(colors[i], stop.color),
                "{:?} != {:?}",
                colors[i],
                stop.color
            );
        }
    }

    #[test]
    fn unsorted_stops_give_same_palette() {
        let mut stops = default_stops();
        let sorted = generate_palette(&stops, 64).unwrap();
        stops.reverse();
        assert_eq!(generate_palette(&stops, 64).unwrap(), sorted);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(A, B, 0.0), A);
        assert_eq!(lerp(A, B, 1.0), B);
        assert_eq!(lerp(A, B, f64::NAN), A);
        assert_eq!(lerp(A, B, f64::INFINITY), B);
    }

    #[test]
    fn lerp_stays_between_colors() {
        for k in 0..=50 {
            let c = lerp(A, B, k as f64 / 50.0);
            for ch in 0..3 {
                assert!(c[ch] >= A[ch].min(B[ch]) && c[ch] <= A[ch].max(B[ch]));
            }
        }
    }

    #[test]
    fn lerp_same_color_is_exact() {
        let c = Rgb([15, 15, 15]);
        for k in 0..=20 {
            assert_eq!(lerp(c, c, k as f64 / 20.0), c);
        }
        assert_eq!(lerp(Rgb([15, 0, 0]), Rgb([0, 0, 0]), 0.8), Rgb([3, 0, 0]));
    }

    #[test]
    fn blend_wraps_around() {
        let palette = Palette::new(vec![A, B]).unwrap();
        assert_eq!(palette.blend(1.0, 1.0), A);
        assert_eq!(palette.blend(2.0, 0.0), A);
        assert_eq!(palette.blend(0.0, 0.0), A);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(Palette::new(Vec::new()), Err(Error::EmptyPalette)));
        assert_eq!(Palette::new(vec![A]).unwrap().len(), 1);
    }

    #[test]
    fn packs_rgb() {
        assert_eq!(to_u32(Rgb([0x12, 0x34, 0x56])), 0x123456);
    }
}
