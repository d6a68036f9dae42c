// FASTA - 繰り返し配列と線形合同法による乱数配列を生成

use std::io::{self, Write};

/// 1行あたりの文字数
pub const LINE_WIDTH: usize = 60;

/// 繰り返し区間の元配列（287文字）
pub const ALU: &[u8] = b"GGCCGGGCGCGGTGGCTCACGCCTGTAATCCCAGCACTTTGG\
GAGGCCGAGGCGGGCGGATCACCTGAGGTCAGGAGTTCGAGA\
CCAGCCTGGCCAACATGGTGAAACCCCGTCTCTACTAAAAAT\
ACAAAAATTAGCCGGGCGTGGTGGCGCGCGCCTGTAATCCCA\
GCTACTCGGGAGGCTGAGGCAGGAGAATCGCTTGAACCCGGG\
AGGCGGAGGTTGCAGTGAGCCGAGATCGCGCCACTGCACTCC\
AGCCTGGGCGACAGAGCGAGACTCCGTCTCAAAAA";

/// IUB曖昧性コードの出現確率
pub const IUB: [(u8, f64); 15] = [
    (b'a', 0.27),
    (b'c', 0.12),
    (b'g', 0.12),
    (b't', 0.27),
    (b'B', 0.02),
    (b'D', 0.02),
    (b'H', 0.02),
    (b'K', 0.02),
    (b'M', 0.02),
    (b'N', 0.02),
    (b'R', 0.02),
    (b'S', 0.02),
    (b'V', 0.02),
    (b'W', 0.02),
    (b'Y', 0.02),
];

/// ヒトゲノムの塩基頻度
pub const HOMO_SAPIENS: [(u8, f64); 4] = [
    (b'a', 0.3029549426680),
    (b'c', 0.1979883004921),
    (b'g', 0.1975473066391),
    (b't', 0.3015094502008),
];

/// 線形合同法の乱数生成器
///
/// `seed = (seed * 3877 + 29573) mod 139968` を更新し、`seed / 139968` を返す。
/// 状態は呼び出し側が保持し、区間をまたいで引き継ぐ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub const MODULUS: u32 = 139_968;
    pub const MULTIPLIER: u32 = 3_877;
    pub const INCREMENT: u32 = 29_573;
    pub const DEFAULT_SEED: u32 = 42;

    pub fn new(seed: u32) -> Self {
        Self {
            seed: seed % Self::MODULUS,
        }
    }

    /// 次の値を [0, 1) で返す
    pub fn next_fraction(&mut self) -> f64 {
        self.seed = (self.seed * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        f64::from(self.seed) / f64::from(Self::MODULUS)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

/// 累積確率テーブル
#[derive(Debug, Clone)]
pub struct CumulativeTable {
    thresholds: Vec<f64>,
    symbols: Vec<u8>,
}

impl CumulativeTable {
    pub fn new(table: &[(u8, f64)]) -> Self {
        let mut thresholds = Vec::with_capacity(table.len());
        let mut symbols = Vec::with_capacity(table.len());
        let mut cumulative = 0.0;
        for &(symbol, probability) in table {
            cumulative += probability;
            thresholds.push(cumulative);
            symbols.push(symbol);
        }
        Self {
            thresholds,
            symbols,
        }
    }

    /// 累積確率が`sample`を超える最初の記号を選ぶ（範囲外は最後の記号）
    pub fn select(&self, sample: f64) -> u8 {
        let index = self.thresholds.partition_point(|&threshold| threshold <= sample);
        let index = index.min(self.symbols.len().saturating_sub(1));
        self.symbols.get(index).copied().unwrap_or(b'\n')
    }
}

/// `source`を巡回して`n`文字を60文字ごとに改行しながら書き出す
pub fn repeat_fasta<W: Write>(writer: &mut W, source: &[u8], n: usize) -> io::Result<()> {
    if source.is_empty() {
        return Ok(());
    }

    let mut line = Vec::with_capacity(LINE_WIDTH + 1);
    let mut position = 0;
    let mut remaining = n;
    while remaining > 0 {
        let line_len = remaining.min(LINE_WIDTH);
        line.clear();
        for _ in 0..line_len {
            line.push(source[position]);
            position = (position + 1) % source.len();
        }
        line.push(b'\n');
        writer.write_all(&line)?;
        remaining -= line_len;
    }
    Ok(())
}

/// 累積確率テーブルから`n`文字をランダムに選んで書き出す
pub fn random_fasta<W: Write>(
    writer: &mut W,
    table: &CumulativeTable,
    n: usize,
    rng: &mut Lcg,
) -> io::Result<()> {
    let mut line = Vec::with_capacity(LINE_WIDTH + 1);
    let mut remaining = n;
    while remaining > 0 {
        let line_len = remaining.min(LINE_WIDTH);
        line.clear();
        for _ in 0..line_len {
            line.push(table.select(rng.next_fraction()));
        }
        line.push(b'\n');
        writer.write_all(&line)?;
        remaining -= line_len;
    }
    Ok(())
}

/// 3区間（ONE / TWO / THREE）を書き出す
///
/// 乱数の状態はTWOからTHREEへ引き継がれる。
pub fn write_fasta<W: Write>(writer: &mut W, n: usize) -> io::Result<Lcg> {
    let mut rng = Lcg::default();

    writer.write_all(b">ONE Homo sapiens alu\n")?;
    repeat_fasta(writer, ALU, n * 2)?;

    writer.write_all(b">TWO IUB ambiguity codes\n")?;
    random_fasta(writer, &CumulativeTable::new(&IUB), n * 3, &mut rng)?;

    writer.write_all(b">THREE Homo sapiens frequency\n")?;
    random_fasta(writer, &CumulativeTable::new(&HOMO_SAPIENS), n * 5, &mut rng)?;

    log::debug!("fasta: n={n}, final seed {}", rng.seed());
    Ok(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_newlines(bytes: &[u8]) -> Vec<u8> {
        bytes.iter().copied().filter(|b| *b != b'\n').collect()
    }

    #[test]
    fn test_alu_length() {
        assert_eq!(ALU.len(), 287);
    }

    #[test]
    fn test_lcg_sequence() {
        let mut rng = Lcg::default();

        rng.next_fraction();
        assert_eq!(rng.seed(), (42 * 3877 + 29573) % 139968);
        let value = rng.next_fraction();
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn test_cumulative_table_bisect_right() {
        let table = CumulativeTable::new(&[(b'x', 0.5), (b'y', 0.5)]);

        assert_eq!(table.select(0.0), b'x');
        // 境界値ちょうどは次の記号
        assert_eq!(table.select(0.5), b'y');
        assert_eq!(table.select(0.99), b'y');
        // 累積和を超える値は最後の記号に丸める
        assert_eq!(table.select(1.5), b'y');
    }

    #[test]
    fn test_repeat_fasta_cycles_source() {
        for n in [0, 1, 59, 60, 61, 287, 1000] {
            let mut output = Vec::new();
            repeat_fasta(&mut output, ALU, n).unwrap();

            let expected: Vec<u8> = ALU.iter().copied().cycle().take(n).collect();
            assert_eq!(strip_newlines(&output), expected, "n={n}");

            let text = String::from_utf8(output).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            if let Some((last, full)) = lines.split_last() {
                assert!(full.iter().all(|line| line.len() == LINE_WIDTH));
                assert!(!last.is_empty() && last.len() <= LINE_WIDTH);
            }
        }
    }

    #[test]
    fn test_random_fasta_uses_table_symbols() {
        let mut output = Vec::new();
        let mut rng = Lcg::default();
        random_fasta(&mut output, &CumulativeTable::new(&IUB), 500, &mut rng).unwrap();

        let symbols: Vec<u8> = IUB.iter().map(|(symbol, _)| *symbol).collect();
        let body = strip_newlines(&output);
        assert_eq!(body.len(), 500);
        assert!(body.iter().all(|b| symbols.contains(b)));
        assert_ne!(rng, Lcg::default());
    }

    #[test]
    fn test_write_fasta_small_output() {
        let mut output = Vec::new();
        write_fasta(&mut output, 10).unwrap();
        let text = String::from_utf8(output).unwrap();

        let expected = "\
>ONE Homo sapiens alu
GGCCGGGCGCGGTGGCTCAC
>TWO IUB ambiguity codes
cttBtatcatatgctaKggNcataaaSatg
>THREE Homo sapiens frequency
taaatcttgtgcttcgttagaagtctcgactacgtgtagcctagtgtttg
";
        assert_eq!(text, expected);
    }
}
