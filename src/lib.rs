//! TransitGraph - 交通网络加权有向图引擎
//!
//! 以站点为顶点、线路为带权有向边，支持：
//! - 站点与线路的增删（邻接表与邻接矩阵同步维护）
//! - BFS / DFS 遍历、Dijkstra 最短路径
//! - Kruskal 最小生成森林、环检测
//! - 操作历史与撤销、网络报告、CSV / JSON Lines 批量导入

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod history;
pub mod import;
pub mod logging;
pub mod report;

// 重导出常用类型
pub use config::{ForestEdges, GraphConfig, RouteMode};
pub use error::{Error, Result};
pub use graph::{Graph, Route, RouteEdge, Station, VertexId, Weight};
pub use history::{Action, ActionHistory, Session};
pub use report::NetworkReport;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
