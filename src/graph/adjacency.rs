//! 邻接存储
//!
//! 每个顶点一条按插入顺序排列的出边列表，外加一个 V×V 的稠密权重矩阵镜像。
//! 两种表示只能通过本模块的方法一起修改，任何方法返回时二者都保持一致。

use crate::graph::route::{Route, RouteEdge, Weight};
use crate::graph::station::VertexId;

/// 邻接表 + 邻接矩阵
#[derive(Debug, Clone, Default)]
pub struct AdjacencyStore {
    /// 出边列表（插入顺序，同一目标最多一条）
    lists: Vec<Vec<Route>>,
    /// 权重矩阵，`None` 表示无线路
    matrix: Vec<Vec<Option<Weight>>>,
}

impl AdjacencyStore {
    /// 创建包含 `n` 个顶点的空存储
    pub fn with_vertices(n: usize) -> Self {
        Self {
            lists: vec![Vec::new(); n],
            matrix: vec![vec![None; n]; n],
        }
    }

    /// 顶点数
    pub fn num_vertices(&self) -> usize {
        self.lists.len()
    }

    /// 下标是否在顶点空间内
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.lists.len()
    }

    /// 扩容到 `n` 个顶点，保留已有数据；`n` 不大于当前顶点数时不做任何事
    pub fn grow(&mut self, n: usize) {
        if n <= self.lists.len() {
            return;
        }
        self.lists.resize_with(n, Vec::new);
        for row in &mut self.matrix {
            row.resize(n, None);
        }
        self.matrix.resize_with(n, || vec![None; n]);
    }

    /// 顶点的出边（越界时为空）
    pub fn routes(&self, v: VertexId) -> &[Route] {
        self.lists.get(v.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// O(1) 权重查询
    pub fn weight(&self, source: VertexId, destination: VertexId) -> Option<Weight> {
        self.matrix
            .get(source.index())
            .and_then(|row| row.get(destination.index()))
            .copied()
            .flatten()
    }

    /// 插入或更新一条边，返回旧权重。调用方保证两个端点都在范围内
    pub fn upsert(&mut self, source: VertexId, destination: VertexId, weight: Weight) -> Option<Weight> {
        let list = &mut self.lists[source.index()];
        let previous = match list.iter_mut().find(|r| r.destination == destination) {
            Some(route) => Some(std::mem::replace(&mut route.weight, weight)),
            None => {
                list.push(Route::new(destination, weight));
                None
            }
        };
        self.matrix[source.index()][destination.index()] = Some(weight);
        previous
    }

    /// 删除一条边，返回被删除的权重。调用方保证两个端点都在范围内
    pub fn remove(&mut self, source: VertexId, destination: VertexId) -> Option<Weight> {
        let list = &mut self.lists[source.index()];
        let removed = list
            .iter()
            .position(|r| r.destination == destination)
            .map(|pos| list.remove(pos).weight);
        self.matrix[source.index()][destination.index()] = None;
        removed
    }

    /// 删除与顶点相连的全部边（出边与入边），按出边顺序、再按入边源顶点升序返回
    pub fn clear_vertex(&mut self, v: VertexId) -> Vec<RouteEdge> {
        let mut removed: Vec<RouteEdge> = std::mem::take(&mut self.lists[v.index()])
            .into_iter()
            .map(|r| RouteEdge::new(v, r.destination, r.weight))
            .collect();

        for i in 0..self.lists.len() {
            let source = VertexId::new(i);
            if let Some(weight) = self.remove(source, v) {
                removed.push(RouteEdge::new(source, v, weight));
            }
            self.matrix[v.index()][i] = None;
        }

        removed
    }

    /// 边总数
    pub fn edge_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// 按源顶点升序、同源按插入顺序枚举所有边
    pub fn edges(&self) -> impl Iterator<Item = RouteEdge> + '_ {
        self.lists.iter().enumerate().flat_map(|(u, list)| {
            list.iter()
                .map(move |r| RouteEdge::new(VertexId::new(u), r.destination, r.weight))
        })
    }

    /// 检查两种表示是否一致：矩阵有值当且仅当邻接表有对应条目，且权重相同
    pub fn is_consistent(&self) -> bool {
        let n = self.lists.len();
        if self.matrix.len() != n || self.matrix.iter().any(|row| row.len() != n) {
            return false;
        }

        for (u, row) in self.matrix.iter().enumerate() {
            let list = &self.lists[u];
            for (v, cell) in row.iter().enumerate() {
                let entry = list.iter().find(|r| r.destination.index() == v);
                match (cell, entry) {
                    (None, None) => {}
                    (Some(w), Some(r)) if *w == r.weight => {}
                    _ => return false,
                }
            }
            // 列表中不允许重复目标
            for (i, r) in list.iter().enumerate() {
                if list[i + 1..].iter().any(|o| o.destination == r.destination) {
                    return false;
                }
            }
        }

        true
    }
}
