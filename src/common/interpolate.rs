//! 単調3次補間（Fritsch–Carlson）
//!
//! 制御点を通り、単調なデータに対して区間内でオーバーシュートしない
//! 区分3次エルミート補間を作ります。

use super::error::{Error, Result};

/// 制御点の範囲外での振る舞い
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// 端の区間の3次式をそのまま延長する
    #[default]
    None,
    /// `y_min + (x - x_min) / (x_max - x_min) * y_max`
    Linear,
    /// 範囲の下では `y_min`、上では `y_max`
    Constant,
}

/// 構築済みの補間関数。各区間の係数を保持する。
#[derive(Clone, Debug)]
pub struct MonotoneCubic {
    xs: Vec<f64>,
    ys: Vec<f64>,
    c1: Vec<f64>,
    c2: Vec<f64>,
    c3: Vec<f64>,
    extrapolation: Extrapolation,
}

impl MonotoneCubic {
    /// 制御点から補間関数を作る。
    ///
    /// 点は内部で x の昇順に並べ替える。同じ x が複数ある場合は
    /// 入力で先に現れた点だけを使う。
    /// 点が0個なら常に0、1個ならその y を返す定数関数になる。
    pub fn new(xs: &[f64], ys: &[f64], extrapolation: Extrapolation) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        let mut points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|later, earlier| later.0 == earlier.0);
        let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        let n = xs.len();
        if n < 2 {
            return Ok(Self {
                xs,
                ys,
                c1: Vec::new(),
                c2: Vec::new(),
                c3: Vec::new(),
                extrapolation,
            });
        }

        let dx: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let ms: Vec<f64> = ys
            .windows(2)
            .zip(&dx)
            .map(|(w, &dx)| (w[1] - w[0]) / dx)
            .collect();

        // 接線の傾き
        let mut c1 = Vec::with_capacity(n);
        c1.push(ms[0]);
        for i in 1..n - 1 {
            let (m0, m1) = (ms[i - 1], ms[i]);
            if m0 * m1 <= 0.0 {
                c1.push(0.0);
            } else {
                let common = dx[i - 1] + dx[i];
                c1.push(3.0 * common / ((common + dx[i]) / m0 + (common + dx[i - 1]) / m1));
            }
        }
        c1.push(ms[n - 2]);

        let mut c2 = Vec::with_capacity(n - 1);
        let mut c3 = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let inv_dx = 1.0 / dx[i];
            let common = c1[i] + c1[i + 1] - 2.0 * ms[i];
            c2.push((ms[i] - c1[i] - common) * inv_dx);
            c3.push(common * inv_dx * inv_dx);
        }
        // 最後の結点の係数は評価に使わない
        c1.truncate(n - 1);

        Ok(Self {
            xs,
            ys,
            c1,
            c2,
            c3,
            extrapolation,
        })
    }

    /// x における補間値
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        match n {
            0 => return 0.0,
            1 => return self.ys[0],
            _ => {}
        }

        let last = n - 1;
        if x == self.xs[last] {
            return self.ys[last];
        }

        let (x_min, x_max) = (self.xs[0], self.xs[last]);
        let (y_min, y_max) = (self.ys[0], self.ys[last]);
        if x < x_min || x > x_max {
            match self.extrapolation {
                Extrapolation::None => {}
                Extrapolation::Linear => return y_min + (x - x_min) / (x_max - x_min) * y_max,
                Extrapolation::Constant => return if x < x_min { y_min } else { y_max },
            }
        }

        let i = match self.xs.binary_search_by(|probe| probe.total_cmp(&x)) {
            Ok(i) => return self.ys[i],
            Err(i) => i.saturating_sub(1).min(last - 1),
        };
        let t = x - self.xs[i];
        self.ys[i] + t * (self.c1[i] + t * (self.c2[i] + t * self.c3[i]))
    }

    /// `f64 -> f64` のクロージャとして取り出す
    pub fn into_fn(self) -> impl Fn(f64) -> f64 + Send + Sync {
        move |x| self.eval(x)
    }
}
