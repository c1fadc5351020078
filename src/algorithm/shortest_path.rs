//! 单源最短路径
//!
//! Dijkstra 算法（非负权）。每轮线性扫描所有顶点选出距离最小的未访问顶点，
//! 总复杂度 O(V²)，与边数无关；松弛阶段沿邻接表进行。
//! 多个顶点距离相同时选下标最小者（只有严格更小才替换当前候选）。

use crate::graph::{Graph, VertexId, Weight};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// 从起点到终点（含两端）的顶点序列
    pub vertices: Vec<VertexId>,
    /// 路径总权重
    pub total_weight: Weight,
    /// 路径边数
    pub hops: usize,
}

/// 一次 Dijkstra 运行后的距离表与前驱表
struct ShortestPathTree {
    dist: Vec<Option<Weight>>,
    parent: Vec<Option<VertexId>>,
}

/// 最短路径查找器
pub struct PathFinder<'a> {
    graph: &'a Graph,
}

impl<'a> PathFinder<'a> {
    /// 创建路径查找器
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 从 `source` 到 `destination` 的最短路径
    ///
    /// 端点越界或终点不可达时返回 None。
    pub fn dijkstra(&self, source: VertexId, destination: VertexId) -> Option<PathResult> {
        let n = self.graph.num_vertices();
        if source.index() >= n || destination.index() >= n {
            debug!(%source, %destination, num_vertices = n, "最短路径端点越界");
            return None;
        }

        let tree = self.run(source, Some(destination));
        let Some(total_weight) = tree.dist[destination.index()] else {
            debug!(%source, %destination, "不存在路径");
            return None;
        };

        let mut vertices = vec![destination];
        let mut current = destination;
        while let Some(prev) = tree.parent[current.index()] {
            vertices.push(prev);
            current = prev;
        }
        vertices.reverse();

        debug!(%source, %destination, total_weight, "最短路径");
        Some(PathResult {
            hops: vertices.len() - 1,
            vertices,
            total_weight,
        })
    }

    /// 从 `source` 出发到每个顶点的最短距离；不可达为 None，起点越界时为空
    pub fn distances(&self, source: VertexId) -> Vec<Option<Weight>> {
        if source.index() >= self.graph.num_vertices() {
            return Vec::new();
        }
        self.run(source, None).dist
    }

    /// `target` 被选中后即可停止：它的距离此后不会再变
    fn run(&self, source: VertexId, target: Option<VertexId>) -> ShortestPathTree {
        let n = self.graph.num_vertices();
        let mut dist: Vec<Option<Weight>> = vec![None; n];
        let mut parent: Vec<Option<VertexId>> = vec![None; n];
        let mut visited = vec![false; n];

        dist[source.index()] = Some(0);

        loop {
            let mut selected: Option<(usize, Weight)> = None;
            for (v, d) in dist.iter().enumerate() {
                if visited[v] {
                    continue;
                }
                if let Some(d) = *d {
                    if selected.map_or(true, |(_, best)| d < best) {
                        selected = Some((v, d));
                    }
                }
            }

            let Some((u, du)) = selected else {
                break;
            };
            visited[u] = true;

            let u = VertexId::new(u);
            if Some(u) == target {
                break;
            }

            for route in self.graph.routes_from(u) {
                let v = route.destination.index();
                if visited[v] {
                    continue;
                }
                let candidate = du.saturating_add(route.weight);
                if dist[v].map_or(true, |current| candidate < current) {
                    dist[v] = Some(candidate);
                    parent[v] = Some(u);
                }
            }
        }

        ShortestPathTree { dist, parent }
    }
}
