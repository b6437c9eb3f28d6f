//! マンデルブロ集合の描画ライブラリ
//!
//! 単調3次スプライン（Fritsch–Carlson）で生成したパレットと、
//! 連続（スムーズ）反復回数による配色でマンデルブロ集合を描画します。

pub mod common;

pub use common::colors::{generate_palette, ColorStop, Palette};
pub use common::config::Config;
pub use common::error::{Error, Result};
pub use common::gradient::Gradient;
pub use common::interpolate::{Extrapolation, MonotoneCubic};
pub use common::mandelbrot::{render, render_cancellable, RenderSettings};
pub use common::region::Region;
