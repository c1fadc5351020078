//! 图算法模块
//!
//! 包含遍历、最短路径、最小生成森林和环检测

mod cycle;
mod shortest_path;
mod spanning_forest;
mod traversal;
mod union_find;

pub use cycle::CycleDetector;
pub use shortest_path::{PathFinder, PathResult};
pub use spanning_forest::SpanningForest;
pub use traversal::Traversal;
pub use union_find::UnionFind;
