//! 站点定义
//!
//! 站点 ID 按约定同时作为图的顶点下标

use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（即站点 ID，同时是邻接表和邻接矩阵的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 站点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// 站点 ID
    id: VertexId,
    /// 站点名称
    name: String,
}

impl Station {
    /// 创建新站点
    pub fn new(id: VertexId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// 获取站点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取站点名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_basic() {
        let s = Station::new(VertexId::new(3), "Central");

        assert_eq!(s.id().index(), 3);
        assert_eq!(s.name(), "Central");
        assert_eq!(s.to_string(), "3(Central)");
    }

    #[test]
    fn test_vertex_id_serializes_as_integer() {
        let json = serde_json::to_string(&VertexId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
