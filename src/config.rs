//! 图配置
//!
//! 初始容量、增长上限、线路语义（有向 / 对称）以及生成森林的候选边规则

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 默认顶点上限（邻接矩阵为 V×V，需要限制增长）
pub const DEFAULT_MAX_VERTICES: usize = 4_096;

/// 线路语义
///
/// 决定环检测的判定方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// 每条线路都是独立的有向边
    #[default]
    Directed,
    /// 调用方总是成对插入 a→b 与 b→a 来表示一条无向线路
    Symmetric,
}

impl RouteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMode::Directed => "directed",
            RouteMode::Symmetric => "symmetric",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directed" | "d" => Ok(RouteMode::Directed),
            "symmetric" | "undirected" | "s" => Ok(RouteMode::Symmetric),
            other => Err(format!("未知的线路模式: {}", other)),
        }
    }
}

/// 生成森林的候选边规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForestEdges {
    /// 只取 `source < destination` 的邻接条目
    #[default]
    Ascending,
    /// 每条非自环线路都作为无向候选边（弱连通分量）
    Weak,
}

impl ForestEdges {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForestEdges::Ascending => "ascending",
            ForestEdges::Weak => "weak",
        }
    }
}

impl fmt::Display for ForestEdges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForestEdges {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(ForestEdges::Ascending),
            "weak" | "all" => Ok(ForestEdges::Weak),
            other => Err(format!("未知的生成森林规则: {}", other)),
        }
    }
}

/// 图配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// 初始顶点数
    pub initial_capacity: usize,
    /// 顶点数上限
    pub max_vertices: usize,
    /// 线路语义
    pub route_mode: RouteMode,
    /// 生成森林候选边规则
    #[serde(default)]
    pub forest_edges: ForestEdges,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_vertices: DEFAULT_MAX_VERTICES,
            route_mode: RouteMode::Directed,
            forest_edges: ForestEdges::Ascending,
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置初始顶点数
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// 设置顶点数上限
    pub fn with_max_vertices(mut self, max: usize) -> Self {
        self.max_vertices = max;
        self
    }

    /// 设置线路语义
    pub fn with_route_mode(mut self, mode: RouteMode) -> Self {
        self.route_mode = mode;
        self
    }

    /// 设置生成森林候选边规则
    pub fn with_forest_edges(mut self, rule: ForestEdges) -> Self {
        self.forest_edges = rule;
        self
    }

    /// 初始顶点数不能超过上限
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > self.max_vertices {
            return Err(Error::CapacityExceeded {
                requested: self.initial_capacity,
                max: self.max_vertices,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_mode_parsing() {
        assert_eq!("directed".parse::<RouteMode>().unwrap(), RouteMode::Directed);
        assert_eq!("Symmetric".parse::<RouteMode>().unwrap(), RouteMode::Symmetric);
        assert_eq!("undirected".parse::<RouteMode>().unwrap(), RouteMode::Symmetric);
        assert!("both".parse::<RouteMode>().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = GraphConfig::new()
            .with_capacity(5)
            .with_max_vertices(64)
            .with_route_mode(RouteMode::Symmetric);

        assert_eq!(config.initial_capacity, 5);
        assert_eq!(config.max_vertices, 64);
        assert_eq!(config.route_mode, RouteMode::Symmetric);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"symmetric\""));
    }

    #[test]
    fn test_forest_edges_default_and_parsing() {
        assert_eq!(GraphConfig::default().forest_edges, ForestEdges::Ascending);
        assert_eq!("weak".parse::<ForestEdges>().unwrap(), ForestEdges::Weak);
        assert_eq!("ASC".parse::<ForestEdges>().unwrap(), ForestEdges::Ascending);
        assert!("dense".parse::<ForestEdges>().is_err());
    }

    #[test]
    fn test_validate_capacity_against_cap() {
        assert!(GraphConfig::new().with_capacity(4).with_max_vertices(4).validate().is_ok());

        let err = GraphConfig::new()
            .with_capacity(10)
            .with_max_vertices(4)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { requested: 10, max: 4 }));
    }
}
