//! 共通定数

/// 描画領域の既定の幅
pub const DEFAULT_WIDTH: u32 = 800;
/// 描画領域の既定の高さ
pub const DEFAULT_HEIGHT: u32 = 600;

/// 最大反復回数
pub const MAX_ITER: u32 = 1000;

/// 発散判定の半径
pub const BAILOUT: f64 = 1e10;

/// パレットの色数
pub const PALETTE_SIZE: usize = 768;

/// 固定点・2周期判定の許容誤差
pub const CYCLE_TOLERANCE: f64 = 1e-15;

/// 初期表示の領域（左下の角）
pub const REGION_MIN: (f64, f64) = (-2.5, -1.0);
/// 初期表示の領域（右上の角）
pub const REGION_MAX: (f64, f64) = (1.0, 1.0);

/// グラデーションの既定の倍率
pub const GRADIENT_SCALE: f64 = 32.0;

/// 既定のカラーマップ（位置, RGB）
pub const DEFAULT_COLORS: [(f64, [u8; 3]); 5] = [
    (0.0, [0, 7, 100]),      // 深い青
    (0.16, [32, 107, 203]),  // 青
    (0.42, [237, 255, 255]), // 白
    (0.6425, [255, 170, 0]), // オレンジ
    (0.8575, [0, 2, 0]),     // ほぼ黒
];
