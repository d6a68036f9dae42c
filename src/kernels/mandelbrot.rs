// Mandelbrot - 1行1作業単位でPBM(P4)画像を生成

use crate::core::{Kernel, ProcessingConfig, ProcessingResult, ProgressReporter};
use crate::engine::{OrderedParallelMap, WriterSink};
use std::io::Write;

/// 反復ブロック数（ブロックごとに発散判定する）
pub const ITERATION_BLOCKS: usize = 7;

/// 1ブロックあたりの反復回数
pub const ITERATIONS_PER_BLOCK: usize = 7;

/// PBMヘッダ `P4\n{size} {size}\n`
pub fn pbm_header(size: usize) -> Vec<u8> {
    format!("P4\n{size} {size}\n").into_bytes()
}

/// 1行あたりのバイト数
pub fn row_len(size: usize) -> usize {
    size.div_ceil(8)
}

// z = c から始めて、ブロックごとに |z| >= 2 なら発散とみなす
fn in_set(cr: f64, ci: f64) -> bool {
    let (mut zr, mut zi) = (cr, ci);
    for _ in 0..ITERATION_BLOCKS {
        for _ in 0..ITERATIONS_PER_BLOCK {
            let next_r = zr * zr - zi * zi + cr;
            zi = 2.0 * zr * zi + ci;
            zr = next_r;
        }
        if zr.hypot(zi) >= 2.0 {
            return false;
        }
    }
    true
}

/// 1行分のビット列を計算
///
/// 各バイトは8画素分で、先頭画素が最上位ビット。
/// 幅が8の倍数でない場合、最終バイトの未使用ビットは0になる。
pub fn render_row(y: usize, size: usize) -> Vec<u8> {
    let c1 = 2.0 / size as f64;
    let ci = y as f64 * c1 - 1.0;
    let bytes = row_len(size);

    let mut row = Vec::with_capacity(bytes);
    for byte_index in 0..bytes {
        let mut pixel = 0u8;
        let mut cr = (byte_index * 8) as f64 * c1 - 1.5;
        for bit in 0..8 {
            if in_set(cr, ci) {
                pixel |= 0x80 >> bit;
            }
            cr += c1;
        }
        row.push(pixel);
    }

    let used_bits = size % 8;
    if used_bits != 0 {
        if let Some(last) = row.last_mut() {
            *last &= 0xffu8 << (8 - used_bits);
        }
    }
    row
}

/// 行番号から行データを計算するカーネル
#[derive(Debug, Clone, Copy)]
pub struct MandelbrotRowKernel {
    size: usize,
}

impl MandelbrotRowKernel {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Kernel<usize> for MandelbrotRowKernel {
    type Output = Vec<u8>;

    fn apply(&self, y: usize) -> Vec<u8> {
        render_row(y, self.size)
    }
}

/// ヘッダと全行を順に書き出し、writerを返す
pub async fn render<C, P, W>(
    map: &OrderedParallelMap<C, P>,
    size: usize,
    mut writer: W,
) -> ProcessingResult<W>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
    W: Write + Send + 'static,
{
    writer.write_all(&pbm_header(size))?;

    let rows: Vec<usize> = (0..size).collect();
    let (summary, sink) = map
        .map_into(rows, MandelbrotRowKernel::new(size), WriterSink::new(writer))
        .await?;

    log::debug!(
        "mandelbrot: {} rows, {} bytes of pixel data",
        summary.emitted_items,
        sink.bytes_written()
    );
    Ok(sink.into_inner())
}
