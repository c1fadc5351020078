//! 交通网络图
//!
//! 站点登记表 + 邻接存储。所有拓扑修改都经过这里，
//! 保证邻接表与邻接矩阵同步更新。

use super::adjacency::AdjacencyStore;
use super::route::{Route, RouteEdge, Weight};
use super::station::{Station, VertexId};
use crate::algorithm::{CycleDetector, PathFinder, SpanningForest, Traversal};
use crate::config::{ForestEdges, GraphConfig, RouteMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// 删除站点的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedStation {
    /// 被删除的站点记录（登记表中可能不存在）
    pub station: Option<Station>,
    /// 随站点一起删除的线路（出边在前，入边按源站点升序）
    pub routes: Vec<RouteEdge>,
}

/// 交通网络图
#[derive(Debug, Clone)]
pub struct Graph {
    /// 配置
    config: GraphConfig,
    /// 站点登记表（无序，按 ID 线性查找）
    stations: Vec<Station>,
    /// 邻接表 + 邻接矩阵
    adjacency: AdjacencyStore,
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl Graph {
    /// 创建包含 `num_vertices` 个顶点的空图
    pub fn new(num_vertices: usize) -> Self {
        Self::with_config(GraphConfig::default().with_capacity(num_vertices))
    }

    /// 按配置创建图
    ///
    /// 初始顶点数超过上限时截断到上限。
    pub fn with_config(mut config: GraphConfig) -> Self {
        if config.initial_capacity > config.max_vertices {
            warn!(
                capacity = config.initial_capacity,
                max = config.max_vertices,
                "初始顶点数超出上限，已截断"
            );
            config.initial_capacity = config.max_vertices;
        }
        let adjacency = AdjacencyStore::with_vertices(config.initial_capacity);
        Self {
            config,
            stations: Vec::new(),
            adjacency,
        }
    }

    /// 按配置创建图；初始顶点数超过上限时返回 `CapacityExceeded`
    pub fn try_with_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// 获取配置
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// 线路语义
    pub fn route_mode(&self) -> RouteMode {
        self.config.route_mode
    }

    /// 切换线路语义（只影响之后的算法调用）
    pub fn set_route_mode(&mut self, mode: RouteMode) {
        self.config.route_mode = mode;
    }

    /// 生成森林候选边规则
    pub fn forest_edges(&self) -> ForestEdges {
        self.config.forest_edges
    }

    /// 切换生成森林候选边规则
    pub fn set_forest_edges(&mut self, rule: ForestEdges) {
        self.config.forest_edges = rule;
    }

    // ==================== 站点操作 ====================

    /// 添加站点
    ///
    /// ID 已存在时拒绝。ID 超出当前顶点空间时，邻接表和邻接矩阵一起扩容到 `id + 1`。
    pub fn add_station(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        let name = name.into();

        if self.station_exists(id) {
            warn!(station = %id, "站点已存在，忽略添加");
            return Err(Error::StationAlreadyExists(id));
        }

        let required = id.index() + 1;
        if required > self.adjacency.num_vertices() {
            if required > self.config.max_vertices {
                warn!(station = %id, max = self.config.max_vertices, "站点 ID 超出顶点上限");
                return Err(Error::CapacityExceeded {
                    requested: required,
                    max: self.config.max_vertices,
                });
            }
            debug!(from = self.adjacency.num_vertices(), to = required, "扩容顶点空间");
            self.adjacency.grow(required);
        }

        info!(station = %id, name = %name, "添加站点");
        self.stations.push(Station::new(id, name));
        Ok(())
    }

    /// 删除站点及其全部出入线路
    pub fn delete_station(&mut self, id: VertexId) -> Result<DeletedStation> {
        let mut removed = None;
        self.stations.retain(|s| {
            if s.id() != id {
                return true;
            }
            if removed.is_none() {
                removed = Some(s.clone());
            }
            false
        });

        if !self.adjacency.contains_vertex(id) {
            if removed.is_none() {
                warn!(station = %id, "删除不存在的站点");
                return Err(Error::StationNotFound(id));
            }
            info!(station = %id, "删除站点（不在顶点空间内）");
            return Ok(DeletedStation {
                station: removed,
                routes: Vec::new(),
            });
        }

        let routes = self.adjacency.clear_vertex(id);
        if removed.is_none() {
            warn!(station = %id, "站点未登记，仅清除其线路");
        }
        info!(station = %id, routes = routes.len(), "删除站点");

        Ok(DeletedStation {
            station: removed,
            routes,
        })
    }

    /// 只移除站点登记记录，保留其线路与顶点空间
    pub fn unregister_station(&mut self, id: VertexId) -> Result<Station> {
        let Some(pos) = self.stations.iter().position(|s| s.id() == id) else {
            warn!(station = %id, "注销不存在的站点");
            return Err(Error::StationNotFound(id));
        };
        info!(station = %id, "注销站点");
        Ok(self.stations.remove(pos))
    }

    /// 获取站点
    pub fn get_station(&self, id: VertexId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }

    /// 站点名称（未登记时为 None）
    pub fn station_name(&self, id: VertexId) -> Option<&str> {
        self.get_station(id).map(Station::name)
    }

    /// 所有站点（登记顺序）
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// 所有站点的拷贝
    pub fn get_all_stations(&self) -> Vec<Station> {
        self.stations.clone()
    }

    /// 站点是否存在
    pub fn station_exists(&self, id: VertexId) -> bool {
        self.stations.iter().any(|s| s.id() == id)
    }

    /// 站点数量
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// 顶点数
    pub fn num_vertices(&self) -> usize {
        self.adjacency.num_vertices()
    }

    // ==================== 线路操作 ====================

    /// 添加线路；已存在时原地更新权重并返回旧权重
    pub fn add_route(
        &mut self,
        source: VertexId,
        destination: VertexId,
        weight: Weight,
    ) -> Result<Option<Weight>> {
        self.check_endpoints(source, destination)?;

        let previous = self.adjacency.upsert(source, destination, weight);
        match previous {
            Some(old) => info!(%source, %destination, old, weight, "线路已存在，更新权重"),
            None => info!(%source, %destination, weight, "添加线路"),
        }
        Ok(previous)
    }

    /// 删除线路；线路不存在时静默返回 None
    pub fn delete_route(&mut self, source: VertexId, destination: VertexId) -> Result<Option<Weight>> {
        self.check_endpoints(source, destination)?;

        let removed = self.adjacency.remove(source, destination);
        if removed.is_some() {
            info!(%source, %destination, "删除线路");
        }
        Ok(removed)
    }

    fn check_endpoints(&self, source: VertexId, destination: VertexId) -> Result<()> {
        for id in [source, destination] {
            if !self.adjacency.contains_vertex(id) {
                warn!(station = %id, num_vertices = self.num_vertices(), "无效的站点 ID");
                return Err(Error::InvalidStation {
                    id,
                    num_vertices: self.num_vertices(),
                });
            }
        }
        Ok(())
    }

    /// 线路权重（O(1) 矩阵查询）
    pub fn route_weight(&self, source: VertexId, destination: VertexId) -> Option<Weight> {
        self.adjacency.weight(source, destination)
    }

    /// 顶点的出边（插入顺序）
    pub fn routes_from(&self, vertex: VertexId) -> &[Route] {
        self.adjacency.routes(vertex)
    }

    /// 全部线路，按源站点升序、同源按插入顺序
    pub fn routes(&self) -> Vec<RouteEdge> {
        self.adjacency.edges().collect()
    }

    /// 线路总数
    pub fn route_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// 出边邻居（插入顺序）
    pub fn neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.routes_from(vertex).iter().map(|r| r.destination).collect()
    }

    /// 出度
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.routes_from(vertex).len()
    }

    /// 入度
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        if !self.adjacency.contains_vertex(vertex) {
            return 0;
        }
        (0..self.num_vertices())
            .filter(|&u| self.adjacency.weight(VertexId::new(u), vertex).is_some())
            .count()
    }

    /// 邻接存储引用
    pub fn adjacency(&self) -> &AdjacencyStore {
        &self.adjacency
    }

    // ==================== 图算法 ====================

    /// 广度优先遍历
    pub fn bfs(&self, start: VertexId) -> Vec<VertexId> {
        Traversal::new(self).bfs(start)
    }

    /// 深度优先遍历（先序）
    pub fn dfs(&self, start: VertexId) -> Vec<VertexId> {
        Traversal::new(self).dfs(start)
    }

    /// 最短路径的顶点序列；无路径或端点越界时为空
    pub fn shortest_path(&self, source: VertexId, destination: VertexId) -> Vec<VertexId> {
        PathFinder::new(self)
            .dijkstra(source, destination)
            .map(|p| p.vertices)
            .unwrap_or_default()
    }

    /// 最小生成森林的边
    pub fn minimum_spanning_tree(&self) -> Vec<RouteEdge> {
        SpanningForest::build(self).edges
    }

    /// 是否存在环
    pub fn detect_cycle(&self) -> bool {
        CycleDetector::new(self).has_cycle()
    }
}
