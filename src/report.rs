//! 网络报告
//!
//! 只读分析：规模、最小生成森林、连通性、环、孤立站点和最繁忙站点

use crate::algorithm::{CycleDetector, SpanningForest};
use crate::config::{ForestEdges, RouteMode};
use crate::error::Result;
use crate::graph::{Graph, VertexId, Weight};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 站点连接度
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDegree {
    pub id: VertexId,
    pub name: String,
    /// 出度 + 入度
    pub degree: usize,
}

/// 网络报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    pub generated_at: DateTime<Utc>,
    pub route_mode: RouteMode,
    pub forest_edges: ForestEdges,
    pub station_count: usize,
    pub vertex_count: usize,
    pub route_count: usize,
    /// 所有线路权重之和
    pub total_route_weight: Weight,
    pub spanning_forest: SpanningForest,
    pub has_cycle: bool,
    /// 没有任何出入线路的已登记站点
    pub isolated_stations: Vec<VertexId>,
    pub busiest_station: Option<StationDegree>,
}

impl NetworkReport {
    /// 基于图的当前快照生成报告
    pub fn generate(graph: &Graph) -> Self {
        let mut isolated_stations = Vec::new();
        let mut busiest_station: Option<StationDegree> = None;

        for station in graph.stations() {
            let degree = graph.out_degree(station.id()) + graph.in_degree(station.id());
            if degree == 0 {
                isolated_stations.push(station.id());
                continue;
            }
            if busiest_station.as_ref().map_or(true, |b| degree > b.degree) {
                busiest_station = Some(StationDegree {
                    id: station.id(),
                    name: station.name().to_string(),
                    degree,
                });
            }
        }
        isolated_stations.sort();

        let total_route_weight = graph
            .adjacency()
            .edges()
            .fold(0 as Weight, |acc, e| acc.saturating_add(e.weight));

        Self {
            generated_at: Utc::now(),
            route_mode: graph.route_mode(),
            forest_edges: graph.forest_edges(),
            station_count: graph.station_count(),
            vertex_count: graph.num_vertices(),
            route_count: graph.route_count(),
            total_route_weight,
            spanning_forest: SpanningForest::build(graph),
            has_cycle: CycleDetector::new(graph).has_cycle(),
            isolated_stations,
            busiest_station,
        }
    }

    /// 连通分量数
    pub fn component_count(&self) -> usize {
        self.spanning_forest.component_count
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn create_test_graph() -> Graph {
        let mut graph = Graph::with_config(GraphConfig::new().with_route_mode(RouteMode::Symmetric));
        for (id, name) in ["Harbor", "Market", "Museum", "Depot", "Airport"].iter().enumerate() {
            graph.add_station(v(id), *name).unwrap();
        }
        for (a, b, w) in [(0, 1, 4), (1, 2, 3), (0, 2, 9)] {
            graph.add_route(v(a), v(b), w).unwrap();
            graph.add_route(v(b), v(a), w).unwrap();
        }
        graph.add_route(v(3), v(1), 2).unwrap();
        graph
    }

    #[test]
    fn test_report_summary() {
        let graph = create_test_graph();
        let report = NetworkReport::generate(&graph);

        assert_eq!(report.station_count, 5);
        assert_eq!(report.vertex_count, 5);
        assert_eq!(report.route_count, 7);
        assert_eq!(report.total_route_weight, 34);
        assert_eq!(report.route_mode, RouteMode::Symmetric);
        assert!(report.has_cycle);

        // 3 -> 1 单向，在对称语义下不参与生成森林
        assert_eq!(report.spanning_forest.total_weight, 7);
        assert_eq!(report.component_count(), 3);
        assert_eq!(report.isolated_stations, vec![v(4)]);

        let busiest = report.busiest_station.unwrap();
        assert_eq!(busiest.id, v(1));
        assert_eq!(busiest.name, "Market");
        assert_eq!(busiest.degree, 5);
    }

    #[test]
    fn test_report_empty_graph() {
        let report = NetworkReport::generate(&Graph::new(0));

        assert_eq!(report.station_count, 0);
        assert!(!report.has_cycle);
        assert!(report.busiest_station.is_none());
        assert!(report.isolated_stations.is_empty());
    }

    #[test]
    fn test_report_json() {
        let graph = create_test_graph();
        let json = NetworkReport::generate(&graph).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["route_mode"], "symmetric");
        assert_eq!(value["forest_edges"], "ascending");
        assert_eq!(value["station_count"], 5);
        assert_eq!(value["spanning_forest"]["edges"].as_array().unwrap().len(), 2);
    }
}
