// Sink - 順序通りに並んだ結果の受け取り先

use crate::core::{OrderedSink, ProcessingResult};
use std::io::Write;

/// 結果をVecに集める
#[derive(Debug)]
pub struct VecSink<R> {
    items: Vec<R>,
}

impl<R> VecSink<R> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn into_inner(self) -> Vec<R> {
        self.items
    }
}

impl<R> Default for VecSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + 'static> OrderedSink<R> for VecSink<R> {
    fn emit(&mut self, _index: usize, value: R) -> ProcessingResult<()> {
        self.items.push(value);
        Ok(())
    }
}

/// バイト列の結果をそのままWriterへ書き出す
///
/// 先頭の行から順に書き出すので、後続の行が計算中でも出力が進む。
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, R> OrderedSink<R> for WriterSink<W>
where
    W: Write + Send + 'static,
    R: AsRef<[u8]> + Send + 'static,
{
    fn emit(&mut self, _index: usize, value: R) -> ProcessingResult<()> {
        let bytes = value.as_ref();
        self.writer.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> ProcessingResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
