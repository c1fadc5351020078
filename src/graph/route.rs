//! 线路定义
//!
//! 邻接表条目 `Route` 与完整的有向边 `RouteEdge`

use crate::graph::station::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 线路权重（距离、时间或票价）。无符号类型，负权不可表示
pub type Weight = u64;

/// 邻接表条目：某个源站点的一条出边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// 目标站点
    pub destination: VertexId,
    /// 权重
    pub weight: Weight,
}

impl Route {
    pub fn new(destination: VertexId, weight: Weight) -> Self {
        Self {
            destination,
            weight,
        }
    }
}

/// 完整的有向边 (source, destination, weight)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub source: VertexId,
    pub destination: VertexId,
    pub weight: Weight,
}

impl RouteEdge {
    pub fn new(source: VertexId, destination: VertexId, weight: Weight) -> Self {
        Self {
            source,
            destination,
            weight,
        }
    }

    /// 是否连接给定的一对站点（不分方向）
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.source == a && self.destination == b) || (self.source == b && self.destination == a)
    }
}

impl fmt::Display for RouteEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (weight: {})",
            self.source, self.destination, self.weight
        )
    }
}
