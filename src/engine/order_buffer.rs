// OrderBuffer - 完了順がばらばらな結果を元の順序に戻すスロット配列

use crate::core::{ProcessingError, ProcessingResult};

/// 固定長スロット配列とドレインカーソル
///
/// 各スロットは空から埋まりへ1回だけ遷移する。
/// ドレインはカーソル位置のスロットが埋まっている間だけ左から右へ進む。
#[derive(Debug)]
pub struct OrderBuffer<R> {
    slots: Vec<Option<R>>,
    cursor: usize,
    filled: usize,
}

impl<R> OrderBuffer<R> {
    pub fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self {
            slots,
            cursor: 0,
            filled: 0,
        }
    }

    /// スロットに結果を格納
    pub fn insert(&mut self, index: usize, value: R) -> ProcessingResult<()> {
        if index >= self.slots.len() {
            return Err(ProcessingError::order_violation(
                index,
                format!("スロット数 {} の範囲外", self.slots.len()),
            ));
        }
        if index < self.cursor || self.slots[index].is_some() {
            return Err(ProcessingError::order_violation(
                index,
                "スロットは既に埋まっています",
            ));
        }

        self.slots[index] = Some(value);
        self.filled += 1;
        Ok(())
    }

    /// カーソル位置が埋まっていれば取り出してカーソルを進める
    pub fn pop_ready(&mut self) -> Option<(usize, R)> {
        let value = self.slots.get_mut(self.cursor)?.take()?;
        let index = self.cursor;
        self.cursor += 1;
        Some((index, value))
    }

    /// 出力可能な連続スロットを順に取り出すイテレーター
    pub fn drain_ready(&mut self) -> DrainReady<'_, R> {
        DrainReady { buffer: self }
    }

    /// 次に出力されるインデックス（= 出力済み件数）
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// これまでに格納された件数
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 全スロットが出力済みか
    pub fn is_complete(&self) -> bool {
        self.cursor == self.slots.len()
    }
}

/// `OrderBuffer::drain_ready`のイテレーター
pub struct DrainReady<'a, R> {
    buffer: &'a mut OrderBuffer<R>,
}

impl<R> Iterator for DrainReady<'_, R> {
    type Item = (usize, R);

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop_ready()
    }
}
