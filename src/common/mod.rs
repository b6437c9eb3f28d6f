//! 描画コアの共通モジュール

pub mod colors;
pub mod config;
pub mod constants;
pub mod error;
pub mod gradient;
pub mod interpolate;
pub mod mandelbrot;
pub mod region;
