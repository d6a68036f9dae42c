// カーネル層 - 各ベンチマークの純粋な計算と出力形式
// 並列化はエンジン層のOrderedParallelMapに委ねる

pub mod binary_trees;
pub mod fasta;
pub mod mandelbrot;
pub mod revcomp;
pub mod spectral_norm;
