//! 广度 / 深度优先遍历
//!
//! 邻居按邻接表插入顺序访问，同一张图上的重复遍历结果完全一致。
//! 深度优先使用显式栈，递归深度不受调用栈限制。

use crate::graph::{Graph, VertexId};
use std::collections::VecDeque;
use tracing::debug;

/// 遍历器
pub struct Traversal<'a> {
    graph: &'a Graph,
}

impl<'a> Traversal<'a> {
    /// 创建遍历器
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 广度优先遍历，返回访问顺序；起点越界时为空
    pub fn bfs(&self, start: VertexId) -> Vec<VertexId> {
        let n = self.graph.num_vertices();
        if start.index() >= n {
            debug!(%start, num_vertices = n, "BFS 起点越界");
            return Vec::new();
        }

        let mut order = Vec::new();
        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();

        visited[start.index()] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            for route in self.graph.routes_from(current) {
                let next = route.destination;
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// 深度优先遍历（先序），返回访问顺序；起点越界时为空
    pub fn dfs(&self, start: VertexId) -> Vec<VertexId> {
        let n = self.graph.num_vertices();
        if start.index() >= n {
            debug!(%start, num_vertices = n, "DFS 起点越界");
            return Vec::new();
        }

        let mut order = vec![start];
        let mut visited = vec![false; n];
        // 栈帧: (顶点, 下一个待检查的出边位置)
        let mut stack: Vec<(VertexId, usize)> = vec![(start, 0)];
        visited[start.index()] = true;

        while let Some(frame) = stack.last_mut() {
            let (vertex, pos) = *frame;
            let routes = self.graph.routes_from(vertex);

            let Some(route) = routes.get(pos) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            let next = route.destination;
            if !visited[next.index()] {
                visited[next.index()] = true;
                order.push(next);
                stack.push((next, 0));
            }
        }

        order
    }

    /// 判断 `destination` 是否可从 `source` 到达
    pub fn is_reachable(&self, source: VertexId, destination: VertexId) -> bool {
        self.bfs(source).contains(&destination)
    }
}
