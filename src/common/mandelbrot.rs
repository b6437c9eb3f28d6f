//! マンデルブロ集合計算関数

use std::f64::consts::LN_2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use image::RgbImage;
use log::debug;
use num_complex::Complex64;
use rayon::prelude::*;

use super::colors::Palette;
use super::constants::{BAILOUT, CYCLE_TOLERANCE, MAX_ITER, REGION_MAX, REGION_MIN};
use super::gradient::Gradient;
use super::region::Region;

/// 描画に使う設定（画像サイズとパレット以外）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub region: Region,
    pub max_iteration: u32,
    pub bailout: f64,
    pub gradient: Gradient,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            region: Region::Corners {
                min: Complex64::new(REGION_MIN.0, REGION_MIN.1),
                max: Complex64::new(REGION_MAX.0, REGION_MAX.1),
            },
            max_iteration: MAX_ITER,
            bailout: BAILOUT,
            gradient: Gradient::default(),
        }
    }
}

/// 反復の結果
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Escape {
    pub iteration: u32,
    /// 終了時の |z|²
    pub norm_sqr: f64,
    /// 固定点または2周期を検出して打ち切ったか
    pub periodic: bool,
}

fn near(a: Complex64, b: Complex64) -> bool {
    (a.re - b.re).abs() < CYCLE_TOLERANCE && (a.im - b.im).abs() < CYCLE_TOLERANCE
}

/// マンデルブロ集合の反復回数を計算
///
/// 直前または2つ前の値と一致したら固定点か2周期に落ちたとみなし、
/// 反復回数を `max_iter` にして打ち切る。3周期以上は検出しない。
pub fn escape(c: Complex64, max_iter: u32, bailout_sq: f64) -> Escape {
    let mut z = Complex64::new(0.0, 0.0);
    let mut prev = z;
    let mut prev2 = z;
    let mut iteration = 0;
    let mut periodic = false;

    while iteration < max_iter && z.norm_sqr() < bailout_sq {
        z = z * z + c;
        iteration += 1;
        if near(z, prev) || near(z, prev2) {
            iteration = max_iter;
            periodic = true;
            break;
        }
        prev2 = prev;
        prev = z;
    }

    Escape {
        iteration,
        norm_sqr: z.norm_sqr(),
        periodic,
    }
}

/// パレット位置を `[0, max)` に収める。NaN は 0、無限大は `max`。
pub fn normalize_index(idx: f64, max: f64) -> f64 {
    if idx.is_nan() {
        0.0
    } else if idx.is_infinite() {
        max
    } else if idx < 0.0 {
        (max + idx).abs() % max
    } else {
        idx
    }
}

/// 連続反復回数からパレット位置を求める
pub fn palette_index(iteration: u32, smoothed: f64, gradient: &Gradient, len: f64) -> f64 {
    let idx = ((iteration as f64 + 1.0 - smoothed).sqrt() * gradient.scale + gradient.shift) % len;
    let idx = normalize_index(idx, len);
    if !gradient.log_index {
        return idx;
    }
    normalize_index(((idx.ln() / len.ln()) * gradient.scale) % len, len)
}

/// 描画開始前に一度だけ求める値
struct PixelContext {
    r_min: f64,
    i_min: f64,
    r_scale: f64,
    i_scale: f64,
    max_iter: u32,
    bailout_sq: f64,
    log_bailout: f64,
    inv_log2: f64,
    palette_len: f64,
    gradient: Gradient,
}

impl PixelContext {
    fn new(width: u32, height: u32, settings: &RenderSettings, palette: &Palette) -> Self {
        let (min, max) = settings.region.corners();
        Self {
            r_min: min.re,
            i_min: min.im,
            r_scale: (max.re - min.re) / width as f64,
            i_scale: (max.im - min.im) / height as f64,
            max_iter: settings.max_iteration,
            bailout_sq: settings.bailout * settings.bailout,
            log_bailout: settings.bailout.ln(),
            inv_log2: 1.0 / LN_2,
            palette_len: palette.len() as f64,
            gradient: settings.gradient,
        }
    }

    fn point(&self, px: usize, py: usize) -> Complex64 {
        Complex64::new(
            px as f64 * self.r_scale + self.r_min,
            py as f64 * self.i_scale + self.i_min,
        )
    }

    fn color(&self, c: Complex64, palette: &Palette) -> [u8; 3] {
        let escape = escape(c, self.max_iter, self.bailout_sq);
        let size = escape.norm_sqr.sqrt();
        let smoothed = (size.ln() * self.log_bailout).ln() * self.inv_log2;
        let bias = smoothed - smoothed.trunc();
        let idx = palette_index(escape.iteration, smoothed, &self.gradient, self.palette_len);
        palette.blend(idx, bias).0
    }
}

fn render_rows(
    width: u32,
    height: u32,
    settings: &RenderSettings,
    palette: &Palette,
    cancel: Option<&AtomicBool>,
) -> RgbImage {
    let start = Instant::now();
    let ctx = PixelContext::new(width, height, settings, palette);
    let mut image = RgbImage::new(width, height);
    let row_len = width as usize * 3;

    if row_len > 0 {
        // 行ごとに別々のワーカーが書き込む
        image
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(py, row)| {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    return;
                }
                for (px, pixel) in row.chunks_exact_mut(3).enumerate() {
                    pixel.copy_from_slice(&ctx.color(ctx.point(px, py), palette));
                }
            });
    }

    debug!(
        "描画: {}x{} 領域 [{}] 最大反復 {} | {:.2?}",
        width,
        height,
        settings.region,
        settings.max_iteration,
        start.elapsed()
    );
    image
}

/// 領域を `width`×`height` の画像に描画する
pub fn render(width: u32, height: u32, settings: &RenderSettings, palette: &Palette) -> RgbImage {
    render_rows(width, height, settings, palette, None)
}

/// [`render`] と同じだが、各行の開始前に `cancel` を確認する。
/// 中断された場合は `None`。
pub fn render_cancellable(
    width: u32,
    height: u32,
    settings: &RenderSettings,
    palette: &Palette,
    cancel: &AtomicBool,
) -> Option<RgbImage> {
    let image = render_rows(width, height, settings, palette, Some(cancel));
    if cancel.load(Ordering::Relaxed) {
        debug!("描画を中断しました");
        return None;
    }
    Some(image)
}
