// Spectral norm - 無限行列Aのスペクトルノルムをべき乗法で近似
// A·u と Aᵗ·u の各行を静的チャンク分割で並列計算する
// チャンクサイズは行数とワーカー数から毎回決める

use crate::core::{Kernel, ProcessingConfig, ProcessingResult, ProgressReporter};
use crate::engine::OrderedParallelMap;
use std::sync::Arc;

/// べき乗法の反復回数
pub const POWER_ITERATIONS: usize = 10;

/// 行列要素 `A(i, j) = 1 / ((i+j)(i+j+1)/2 + i + 1)`
pub fn eval_a(i: usize, j: usize) -> f64 {
    let (i, j) = (i as u64, j as u64);
    let ij = i + j;
    1.0 / ((ij * (ij + 1) / 2 + i + 1) as f64)
}

/// ベクトルとの積の1行分を計算するカーネル
///
/// `transpose`がtrueなら `Aᵗ·u` の行、falseなら `A·u` の行。
pub struct RowProductKernel {
    vector: Arc<Vec<f64>>,
    transpose: bool,
}

impl RowProductKernel {
    pub fn new(vector: Arc<Vec<f64>>, transpose: bool) -> Self {
        Self { vector, transpose }
    }
}

impl Kernel<usize> for RowProductKernel {
    type Output = f64;

    fn apply(&self, i: usize) -> f64 {
        let mut sum = 0.0;
        for (j, u_j) in self.vector.iter().enumerate() {
            let a = if self.transpose {
                eval_a(j, i)
            } else {
                eval_a(i, j)
            };
            sum += a * u_j;
        }
        sum
    }
}

async fn multiply<C, P>(
    map: &OrderedParallelMap<C, P>,
    vector: Vec<f64>,
    transpose: bool,
) -> ProcessingResult<Vec<f64>>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
{
    let rows: Vec<usize> = (0..vector.len()).collect();
    let kernel = Arc::new(RowProductKernel::new(Arc::new(vector), transpose));
    map.map_balanced(rows, kernel).await
}

/// `AᵗA·u`
pub async fn multiply_ata<C, P>(
    map: &OrderedParallelMap<C, P>,
    u: Vec<f64>,
) -> ProcessingResult<Vec<f64>>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
{
    let au = multiply(map, u, false).await?;
    multiply(map, au, true).await
}

/// n×n の部分行列でスペクトルノルムを近似する
pub async fn spectral_norm<C, P>(map: &OrderedParallelMap<C, P>, n: usize) -> ProcessingResult<f64>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
{
    let mut u = vec![1.0; n];
    let mut v = Vec::new();
    for _ in 0..POWER_ITERATIONS {
        v = multiply_ata(map, u).await?;
        u = multiply_ata(map, v.clone()).await?;
    }

    let mut v_bv = 0.0;
    let mut vv = 0.0;
    for (u_i, v_i) in u.iter().zip(&v) {
        v_bv += u_i * v_i;
        vv += v_i * v_i;
    }
    Ok((v_bv / vv).sqrt())
}

/// 出力形式（小数点以下9桁）
pub fn format_norm(value: f64) -> String {
    format!("{value:.9}")
}
