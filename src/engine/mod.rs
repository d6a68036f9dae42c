// エンジン層 - 順序保証付き並列マップとオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod chunked;
pub mod collector;
pub mod consumer;
pub mod order_buffer;
pub mod ordered_map;
mod pipeline;
pub mod producer;
pub mod sink;

// 公開API - 主要エンジンクラス
pub use api::create_ordered_map_with_workers;
pub use order_buffer::OrderBuffer;
pub use ordered_map::OrderedParallelMap;
pub use sink::{VecSink, WriterSink};
