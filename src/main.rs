//! マンデルブロ集合ビューア
//!
//! 操作方法:
//!   - ウィンドウのサイズ変更: その大きさで再描画
//!   - S キー: 現在の表示を画像として保存
//!   - Q / Escape キー: 終了
//!
//! `--output` を指定するとウィンドウを開かずに画像を書き出して終了します。

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use image::RgbImage;
use log::{error, info};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use smoothbrot::common::colors::to_u32;
use smoothbrot::{render, Config, Error, Palette, RenderSettings};

#[derive(Parser)]
#[command(version, about = "マンデルブロ集合を滑らかな配色で描画します")]
struct Args {
    /// 設定ファイル (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// 画像の幅
    #[arg(long)]
    width: Option<u32>,
    /// 画像の高さ
    #[arg(long)]
    height: Option<u32>,
    /// 最大反復回数
    #[arg(short, long)]
    max_iteration: Option<u32>,
    /// 画像を書き出して終了する
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// ビューアの状態
struct ViewerState {
    settings: RenderSettings,
    palette: Palette,
    image: RgbImage,
    buffer: Vec<u32>,
    save_counter: u32,
}

impl ViewerState {
    fn new(settings: RenderSettings, palette: Palette) -> Self {
        Self {
            settings,
            palette,
            image: RgbImage::new(0, 0),
            buffer: Vec::new(),
            save_counter: 0,
        }
    }

    fn size(&self) -> (usize, usize) {
        let (w, h) = self.image.dimensions();
        (w as usize, h as usize)
    }

    fn render(&mut self, width: usize, height: usize) {
        let start = Instant::now();
        self.image = render(width as u32, height as u32, &self.settings, &self.palette);
        self.buffer = self.image.pixels().map(|&p| to_u32(p)).collect();
        info!("再描画: {}x{} {:.2?}", width, height, start.elapsed());
    }

    fn save_image(&mut self) -> Result<PathBuf, Error> {
        self.save_counter += 1;
        let filename = PathBuf::from(format!("mandelbrot_{:03}.png", self.save_counter));
        self.image.save(&filename)?;
        Ok(filename)
    }
}

fn run_window(config: &Config, mut state: ViewerState) -> Result<(), Error> {
    let mut window = Window::new(
        "マンデルブロ集合",
        config.width as usize,
        config.height as usize,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        let (width, height) = window.get_size();
        if width > 0 && height > 0 && (width, height) != state.size() {
            state.render(width, height);
        }

        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            match state.save_image() {
                Ok(path) => info!("画像を保存しました: {}", path.display()),
                Err(err) => error!("画像の保存に失敗しました: {}", err),
            }
        }

        let (w, h) = state.size();
        if state.buffer.is_empty() {
            window.update();
        } else {
            window.update_with_buffer(&state.buffer, w, h)?;
        }
    }

    info!("終了しました");
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(max_iteration) = args.max_iteration {
        config.max_iteration = max_iteration;
    }

    let palette = config.palette()?;
    let state = ViewerState::new(config.to_settings(), palette);

    match &args.output {
        Some(path) => {
            let start = Instant::now();
            let image = render(config.width, config.height, &state.settings, &state.palette);
            image.save(path)?;
            info!("画像を保存しました: {} ({:.2?})", path.display(), start.elapsed());
            Ok(())
        }
        None => run_window(&config, state),
    }
}
