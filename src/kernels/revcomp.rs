// Reverse complement - FASTAレコードごとに相補鎖を逆順で出力
// 大きな入力のみレコード単位で並列化し、入力順に書き出す

use crate::core::{Kernel, ProcessingConfig, ProcessingResult, ProgressReporter};
use crate::engine::{OrderedParallelMap, WriterSink};
use std::io::{BufRead, Write};

/// 出力の1行あたりの文字数
pub const LINE_WIDTH: usize = 60;

/// 先頭レコードの配列がこのバイト数以上なら並列処理する
pub const REVCOMP_PARALLEL_THRESHOLD: usize = 1_000_000;

const COMPLEMENT_FROM: &[u8; 16] = b"ABCDGHKMNRSTUVWY";
const COMPLEMENT_TO: &[u8; 16] = b"TVGHCDMKNYSAABWR";

const COMPLEMENT: [u8; 256] = build_complement_table();

const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    let mut k = 0;
    while k < COMPLEMENT_FROM.len() {
        let to = COMPLEMENT_TO[k];
        table[COMPLEMENT_FROM[k] as usize] = to;
        table[COMPLEMENT_FROM[k].to_ascii_lowercase() as usize] = to;
        k += 1;
    }
    table
}

/// 1塩基の相補（表にない文字はそのまま）
pub fn complement(base: u8) -> u8 {
    COMPLEMENT[base as usize]
}

/// ヘッダ行と配列本体の組
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaRecord {
    /// `>`で始まる行（改行を含む）
    pub header: Vec<u8>,
    /// ヘッダ以降の行をそのまま連結したもの（改行を含む）
    pub sequence: Vec<u8>,
}

/// 入力をレコード列に分割する
///
/// 最初の`>`行より前のバイトは読み捨てる。
pub fn read_records<R: BufRead>(mut reader: R) -> std::io::Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.first() == Some(&b'>') {
            records.push(FastaRecord {
                header: line.clone(),
                sequence: Vec::new(),
            });
        } else if let Some(record) = records.last_mut() {
            record.sequence.extend_from_slice(&line);
        }
    }
    Ok(records)
}

/// 配列の相補鎖を逆順にし、60文字ごとに改行した本体を返す
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    let bases: Vec<u8> = sequence
        .iter()
        .rev()
        .filter(|b| !matches!(b, b'\n' | b'\r' | b' '))
        .map(|b| complement(*b))
        .collect();

    let mut output = Vec::with_capacity(bases.len() + bases.len() / LINE_WIDTH + 1);
    for line in bases.chunks(LINE_WIDTH) {
        output.extend_from_slice(line);
        output.push(b'\n');
    }
    output
}

/// レコード1件をヘッダ付きの出力バイト列に変換するカーネル
#[derive(Debug, Clone, Copy, Default)]
pub struct RevcompKernel;

impl Kernel<FastaRecord> for RevcompKernel {
    type Output = Vec<u8>;

    fn apply(&self, record: FastaRecord) -> Vec<u8> {
        let mut output = record.header;
        output.extend_from_slice(&reverse_complement(&record.sequence));
        output
    }
}

/// 並列処理に切り替えるかどうか
pub fn should_parallelize(records: &[FastaRecord], workers: usize) -> bool {
    workers > 1
        && records
            .first()
            .is_some_and(|record| record.sequence.len() >= REVCOMP_PARALLEL_THRESHOLD)
}

/// 入力の全レコードを処理してwriterへ入力順に書き出す
pub async fn run<C, P, R, W>(
    map: &OrderedParallelMap<C, P>,
    reader: R,
    mut writer: W,
) -> ProcessingResult<W>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
    R: BufRead,
    W: Write + Send + 'static,
{
    let records = read_records(reader)?;

    if !should_parallelize(&records, map.worker_count()) {
        log::debug!("revcomp: {} records, sequential", records.len());
        for record in records {
            writer.write_all(&RevcompKernel.apply(record))?;
        }
        return Ok(writer);
    }

    log::debug!("revcomp: {} records, parallel", records.len());
    let (_summary, sink) = map
        .map_into(records, RevcompKernel, WriterSink::new(writer))
        .await?;
    Ok(sink.into_inner())
}
