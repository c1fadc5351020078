//! 环检测
//!
//! 对每个未访问顶点重新开始深度优先搜索，维护 `visited`（曾经进入）
//! 与 `on_path`（位于当前搜索路径上）两组标记，走到 `on_path` 顶点即发现环。
//! 使用显式栈代替递归。

use crate::config::RouteMode;
use crate::graph::{Graph, VertexId};
use tracing::debug;

/// 栈帧
struct Frame {
    vertex: VertexId,
    /// 下一个待检查的出边位置
    next: usize,
    /// 进入本顶点所经过的上一个顶点
    parent: Option<VertexId>,
}

/// 环检测器
pub struct CycleDetector<'a> {
    graph: &'a Graph,
    mode: RouteMode,
}

impl<'a> CycleDetector<'a> {
    /// 按图配置的线路语义创建
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            mode: graph.route_mode(),
        }
    }

    /// 指定线路语义
    ///
    /// `Symmetric` 下忽略沿来路立即返回的那条边，因此成对线路不算环。
    pub fn with_mode(mut self, mode: RouteMode) -> Self {
        self.mode = mode;
        self
    }

    /// 整张图是否存在环
    pub fn has_cycle(&self) -> bool {
        let n = self.graph.num_vertices();
        let mut visited = vec![false; n];
        let mut on_path = vec![false; n];

        for start in 0..n {
            if visited[start] {
                continue;
            }
            if let Some(at) = self.search_from(VertexId::new(start), &mut visited, &mut on_path) {
                debug!(vertex = %at, mode = %self.mode, "发现环");
                return true;
            }
        }

        false
    }

    /// 从 `start` 出发搜索，返回闭合环的顶点
    fn search_from(
        &self,
        start: VertexId,
        visited: &mut [bool],
        on_path: &mut [bool],
    ) -> Option<VertexId> {
        visited[start.index()] = true;
        on_path[start.index()] = true;
        let mut stack = vec![Frame {
            vertex: start,
            next: 0,
            parent: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let routes = self.graph.routes_from(frame.vertex);
            let Some(route) = routes.get(frame.next) else {
                on_path[frame.vertex.index()] = false;
                stack.pop();
                continue;
            };
            frame.next += 1;

            let next = route.destination;
            if self.mode == RouteMode::Symmetric && Some(next) == frame.parent {
                continue;
            }

            if on_path[next.index()] {
                return Some(next);
            }
            if !visited[next.index()] {
                visited[next.index()] = true;
                on_path[next.index()] = true;
                let parent = Some(frame.vertex);
                stack.push(Frame {
                    vertex: next,
                    next: 0,
                    parent,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn triangle() -> Graph {
        let mut graph = Graph::new(0);
        for id in 0..3 {
            graph.add_station(v(id), format!("S{}", id)).unwrap();
        }
        graph.add_route(v(0), v(1), 5).unwrap();
        graph.add_route(v(1), v(2), 5).unwrap();
        graph.add_route(v(2), v(0), 5).unwrap();
        graph
    }

    #[test]
    fn test_directed_triangle() {
        let mut graph = triangle();
        assert!(graph.detect_cycle());

        graph.delete_route(v(2), v(0)).unwrap();
        assert!(!graph.detect_cycle());
    }

    #[test]
    fn test_triangle_in_both_modes() {
        let graph = triangle();
        assert!(CycleDetector::new(&graph).with_mode(RouteMode::Directed).has_cycle());
        assert!(CycleDetector::new(&graph).with_mode(RouteMode::Symmetric).has_cycle());
    }

    #[test]
    fn test_symmetric_pair() {
        let mut graph = Graph::new(2);
        graph.add_route(v(0), v(1), 3).unwrap();
        graph.add_route(v(1), v(0), 3).unwrap();

        // 有向语义下成对线路就是 2-环
        assert!(CycleDetector::new(&graph).has_cycle());
        assert!(!CycleDetector::new(&graph)
            .with_mode(RouteMode::Symmetric)
            .has_cycle());
    }

    #[test]
    fn test_symmetric_tree_and_loop() {
        let mut graph = Graph::with_config(
            GraphConfig::new()
                .with_capacity(4)
                .with_route_mode(RouteMode::Symmetric),
        );
        for (a, b) in [(0, 1), (1, 2), (1, 3)] {
            graph.add_route(v(a), v(b), 1).unwrap();
            graph.add_route(v(b), v(a), 1).unwrap();
        }
        assert!(!graph.detect_cycle());

        graph.add_route(v(2), v(3), 1).unwrap();
        graph.add_route(v(3), v(2), 1).unwrap();
        assert!(graph.detect_cycle());
    }

    #[test]
    fn test_diamond_dag_has_no_cycle() {
        let mut graph = Graph::new(4);
        graph.add_route(v(0), v(1), 1).unwrap();
        graph.add_route(v(0), v(2), 1).unwrap();
        graph.add_route(v(1), v(3), 1).unwrap();
        graph.add_route(v(2), v(3), 1).unwrap();

        assert!(!graph.detect_cycle());
    }

    #[test]
    fn test_self_loop() {
        let mut graph = Graph::new(2);
        graph.add_route(v(1), v(1), 1).unwrap();

        assert!(CycleDetector::new(&graph).has_cycle());
        assert!(CycleDetector::new(&graph)
            .with_mode(RouteMode::Symmetric)
            .has_cycle());
    }

    #[test]
    fn test_cycle_in_later_component() {
        let mut graph = Graph::new(6);
        graph.add_route(v(0), v(1), 1).unwrap();
        graph.add_route(v(3), v(4), 1).unwrap();
        graph.add_route(v(4), v(5), 1).unwrap();
        graph.add_route(v(5), v(3), 1).unwrap();

        assert!(graph.detect_cycle());
    }

    #[test]
    fn test_cycle_reached_from_earlier_start() {
        // 从 0 进入 1 -> 2 -> 1 的环
        let mut graph = Graph::new(3);
        graph.add_route(v(0), v(1), 1).unwrap();
        graph.add_route(v(1), v(2), 1).unwrap();
        graph.add_route(v(2), v(1), 1).unwrap();

        assert!(graph.detect_cycle());
    }

    #[test]
    fn test_empty_graph() {
        assert!(!Graph::new(0).detect_cycle());
        assert!(!Graph::new(5).detect_cycle());
    }

    #[test]
    fn test_long_chain_with_back_edge() {
        let n = 1_200;
        let mut graph = Graph::new(n);
        for i in 0..n - 1 {
            graph.add_route(v(i), v(i + 1), 1).unwrap();
        }
        assert!(!graph.detect_cycle());

        graph.add_route(v(n - 1), v(0), 1).unwrap();
        assert!(graph.detect_cycle());
    }
}
