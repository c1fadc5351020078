//! 图核心模块
//!
//! 定义站点、线路、邻接存储和交通网络图

mod adjacency;
mod graph;
mod route;
mod station;

pub use adjacency::AdjacencyStore;
pub use graph::{DeletedStation, Graph};
pub use route::{Route, RouteEdge, Weight};
pub use station::{Station, VertexId};
