//! 最小生成森林
//!
//! Kruskal 算法：收集候选边，按权重稳定排序，再用并查集跳过成环的边。
//! 图不连通时结果是每个连通分量一棵树，边数为 `V - 分量数`。

use super::union_find::UnionFind;
use crate::config::ForestEdges;
use crate::graph::{Graph, RouteEdge, Weight};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 最小生成森林
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanningForest {
    /// 选中的边（按权重升序）
    pub edges: Vec<RouteEdge>,
    /// 总权重
    pub total_weight: Weight,
    /// 连通分量数（含孤立顶点）
    pub component_count: usize,
}

impl SpanningForest {
    /// 基于图的当前快照构建
    pub fn build(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        let mut candidates = Self::candidate_edges(graph);
        // 稳定排序：同权重保持枚举顺序
        candidates.sort_by_key(|e| e.weight);

        let mut sets = UnionFind::new(n);
        let mut edges = Vec::new();
        let mut total_weight: Weight = 0;

        for edge in candidates {
            if sets.union(edge.source.index(), edge.destination.index()) {
                total_weight = total_weight.saturating_add(edge.weight);
                edges.push(edge);
            }
        }

        let component_count = n - edges.len();
        debug!(
            edges = edges.len(),
            total_weight,
            component_count,
            "构建最小生成森林"
        );

        Self {
            edges,
            total_weight,
            component_count,
        }
    }

    /// 候选边
    ///
    /// 默认只取 `source < destination` 的邻接条目；`Weak` 规则下
    /// 每条非自环线路都作为无向候选边。
    pub fn candidate_edges(graph: &Graph) -> Vec<RouteEdge> {
        let edges = graph.adjacency().edges();
        match graph.forest_edges() {
            ForestEdges::Ascending => edges.filter(|e| e.source < e.destination).collect(),
            ForestEdges::Weak => edges.filter(|e| e.source != e.destination).collect(),
        }
    }

    /// 是否为一棵覆盖所有顶点的生成树
    pub fn is_spanning_tree(&self) -> bool {
        self.component_count == 1
    }
}
