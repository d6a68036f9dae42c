// Binary trees - 完全二分木の生成と走査によるアロケーション負荷
// 同じ深さの木の検査をチャンク単位で並列に合計する

use crate::core::{Kernel, ProcessingConfig, ProcessingResult, ProgressReporter};
use crate::engine::OrderedParallelMap;
use std::fmt;
use std::io::{self, Write};

/// 最小の深さ
pub const MIN_DEPTH: u32 = 4;

/// 1作業単位にまとめる木の数
pub const TREE_CHUNK_SIZE: u64 = 5000;

/// 所有権で子を持つ二分木
#[derive(Debug)]
pub struct Tree {
    children: Option<Box<(Tree, Tree)>>,
}

impl Tree {
    /// 深さ`depth`の完全二分木を作る
    pub fn bottom_up(depth: u32) -> Self {
        let children = if depth > 0 {
            Some(Box::new((
                Tree::bottom_up(depth - 1),
                Tree::bottom_up(depth - 1),
            )))
        } else {
            None
        };
        Tree { children }
    }

    /// ノード数（葉は1）
    pub fn check(&self) -> u64 {
        match &self.children {
            Some(children) => 1 + children.0.check() + children.1.check(),
            None => 1,
        }
    }
}

/// 同じ深さの木`count`本分の作業単位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBatch {
    pub depth: u32,
    pub count: u64,
}

/// バッチ内の木を作って検査し、合計を返すカーネル
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBatchKernel;

impl Kernel<TreeBatch> for TreeBatchKernel {
    type Output = u64;

    fn apply(&self, batch: TreeBatch) -> u64 {
        (0..batch.count)
            .map(|_| Tree::bottom_up(batch.depth).check())
            .sum()
    }
}

/// `iterations`本の木をTREE_CHUNK_SIZEごとのバッチに分ける
pub fn iteration_batches(iterations: u64, depth: u32) -> Vec<TreeBatch> {
    let mut batches = Vec::new();
    let mut remaining = iterations;
    while remaining > 0 {
        let count = remaining.min(TREE_CHUNK_SIZE);
        batches.push(TreeBatch { depth, count });
        remaining -= count;
    }
    batches
}

/// 各深さの集計結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthReport {
    pub iterations: u64,
    pub depth: u32,
    pub check: u64,
}

/// 実行結果全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTreesReport {
    pub stretch_depth: u32,
    pub stretch_check: u64,
    pub depths: Vec<DepthReport>,
    pub max_depth: u32,
    pub long_lived_check: u64,
}

impl BinaryTreesReport {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for BinaryTreesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "stretch tree of depth {}\t check: {}",
            self.stretch_depth, self.stretch_check
        )?;
        for report in &self.depths {
            writeln!(
                f,
                "{}\t trees of depth {}\t check: {}",
                report.iterations, report.depth, report.check
            )?;
        }
        writeln!(
            f,
            "long lived tree of depth {}\t check: {}",
            self.max_depth, self.long_lived_check
        )
    }
}

/// 最大深さ `max(MIN_DEPTH + 2, n)`
pub fn max_depth_for(n: u32) -> u32 {
    (MIN_DEPTH + 2).max(n)
}

/// 全深さを計算する
///
/// 長寿命の木は反復の前に作り、反復の後で検査する。
pub async fn run<C, P>(map: &OrderedParallelMap<C, P>, n: u32) -> ProcessingResult<BinaryTreesReport>
where
    C: ProcessingConfig,
    P: ProgressReporter + 'static,
{
    let max_depth = max_depth_for(n);
    let stretch_depth = max_depth + 1;

    let stretch_check = Tree::bottom_up(stretch_depth).check();
    let long_lived_tree = Tree::bottom_up(max_depth);

    let mut depths = Vec::new();
    for depth in (MIN_DEPTH..=max_depth).step_by(2) {
        let iterations = 1u64 << (max_depth + MIN_DEPTH - depth);
        let sums = map
            .map(iteration_batches(iterations, depth), TreeBatchKernel)
            .await?;
        let check = sums.into_iter().sum();
        log::debug!("binary-trees: depth {depth} done ({iterations} trees)");
        depths.push(DepthReport {
            iterations,
            depth,
            check,
        });
    }

    Ok(BinaryTreesReport {
        stretch_depth,
        stretch_check,
        depths,
        max_depth,
        long_lived_check: long_lived_tree.check(),
    })
}
