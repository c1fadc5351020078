//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 批量导入站点和线路。
//! 格式错误的行或被图拒绝的修改只计入错误数，不中断导入。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId, Weight};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub stations_imported: usize,
    pub routes_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// CSV 站点行: `id,name`
#[derive(Debug, Deserialize)]
struct StationRecord {
    id: usize,
    name: String,
}

/// CSV 线路行: `source,destination,weight`
#[derive(Debug, Deserialize)]
struct RouteRecord {
    source: usize,
    destination: usize,
    weight: Weight,
}

/// JSON Lines 记录
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NetworkRecord {
    Station { id: usize, name: String },
    Route {
        source: usize,
        destination: usize,
        weight: Weight,
    },
}

/// 网络导入器
pub struct NetworkImporter<'a> {
    graph: &'a mut Graph,
    symmetric: bool,
}

impl<'a> NetworkImporter<'a> {
    /// 创建导入器
    pub fn new(graph: &'a mut Graph) -> Self {
        Self {
            graph,
            symmetric: false,
        }
    }

    /// 每条线路同时插入反向边
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// 从 CSV 文件导入站点
    pub fn import_stations_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_stations_from_reader(file)
    }

    /// 从任意读取器导入站点 CSV（需要表头）
    pub fn import_stations_from_reader<R: Read>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for (row, record) in csv_reader.deserialize::<StationRecord>().enumerate() {
            match record {
                Ok(r) => self.apply_station(r.id, r.name, &mut stats),
                Err(e) => {
                    warn!(row = row + 1, error = %e, "站点行解析失败");
                    stats.errors += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            stations = stats.stations_imported,
            errors = stats.errors,
            "站点导入完成"
        );
        Ok(stats)
    }

    /// 从 CSV 文件导入线路
    pub fn import_routes_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_routes_from_reader(file)
    }

    /// 从任意读取器导入线路 CSV（需要表头）
    pub fn import_routes_from_reader<R: Read>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        for (row, record) in csv_reader.deserialize::<RouteRecord>().enumerate() {
            match record {
                Ok(r) => self.apply_route(r.source, r.destination, r.weight, &mut stats),
                Err(e) => {
                    warn!(row = row + 1, error = %e, "线路行解析失败");
                    stats.errors += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            routes = stats.routes_imported,
            errors = stats.errors,
            "线路导入完成"
        );
        Ok(stats)
    }

    /// 从 JSON Lines 文件导入
    pub fn import_jsonl<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_jsonl_from_reader(BufReader::new(file))
    }

    /// 从任意读取器导入 JSON Lines；空行跳过
    pub fn import_jsonl_from_reader<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_record(&line) {
                Ok(NetworkRecord::Station { id, name }) => self.apply_station(id, name, &mut stats),
                Ok(NetworkRecord::Route {
                    source,
                    destination,
                    weight,
                }) => self.apply_route(source, destination, weight, &mut stats),
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "JSON 记录解析失败");
                    stats.errors += 1;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            stations = stats.stations_imported,
            routes = stats.routes_imported,
            errors = stats.errors,
            "网络导入完成"
        );
        Ok(stats)
    }

    fn parse_record(line: &str) -> Result<NetworkRecord> {
        serde_json::from_str(line).map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))
    }

    fn apply_station(&mut self, id: usize, name: String, stats: &mut ImportStats) {
        match self.graph.add_station(VertexId::new(id), name) {
            Ok(()) => stats.stations_imported += 1,
            Err(_) => stats.errors += 1,
        }
    }

    fn apply_route(&mut self, source: usize, destination: usize, weight: Weight, stats: &mut ImportStats) {
        let (source, destination) = (VertexId::new(source), VertexId::new(destination));
        if self.graph.add_route(source, destination, weight).is_err() {
            stats.errors += 1;
            return;
        }
        stats.routes_imported += 1;

        if self.symmetric && source != destination {
            match self.graph.add_route(destination, source, weight) {
                Ok(_) => stats.routes_imported += 1,
                Err(_) => stats.errors += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_import_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let stations = dir.path().join("stations.csv");
        let routes = dir.path().join("routes.csv");

        let mut f = File::create(&stations).unwrap();
        writeln!(f, "id,name").unwrap();
        writeln!(f, "0, Harbor").unwrap();
        writeln!(f, "1,Market").unwrap();
        writeln!(f, "2,Museum").unwrap();
        writeln!(f, "1,Duplicate").unwrap();
        writeln!(f, "x,Broken").unwrap();

        let mut f = File::create(&routes).unwrap();
        writeln!(f, "source,destination,weight").unwrap();
        writeln!(f, "0,1,4").unwrap();
        writeln!(f, "1,2,3").unwrap();
        writeln!(f, "2,7,1").unwrap();
        writeln!(f, "0,2,-5").unwrap();

        let mut graph = Graph::new(0);
        let mut importer = NetworkImporter::new(&mut graph);

        let s = importer.import_stations_csv(&stations).unwrap();
        assert_eq!(s.stations_imported, 3);
        assert_eq!(s.errors, 2);

        let r = importer.import_routes_csv(&routes).unwrap();
        assert_eq!(r.routes_imported, 2);
        assert_eq!(r.errors, 2);

        assert_eq!(graph.station_name(v(0)), Some("Harbor"));
        assert_eq!(graph.route_weight(v(0), v(1)), Some(4));
        assert_eq!(graph.route_weight(v(0), v(2)), None);
    }

    #[test]
    fn test_import_symmetric_routes() {
        let mut graph = Graph::new(3);
        let data = "source,destination,weight\n0,1,5\n1,2,6\n";

        let stats = NetworkImporter::new(&mut graph)
            .with_symmetric(true)
            .import_routes_from_reader(data.as_bytes())
            .unwrap();

        assert_eq!(stats.routes_imported, 4);
        assert_eq!(graph.route_weight(v(1), v(0)), Some(5));
        assert_eq!(graph.route_weight(v(2), v(1)), Some(6));
    }

    #[test]
    fn test_import_jsonl() {
        let data = r#"{"type":"station","id":0,"name":"A"}
{"type":"station","id":1,"name":"B"}

{"type":"route","source":0,"destination":1,"weight":12}
{"type":"route","source":1}
not json
"#;
        let mut graph = Graph::new(0);
        let stats = NetworkImporter::new(&mut graph)
            .import_jsonl_from_reader(data.as_bytes())
            .unwrap();

        assert_eq!(stats.stations_imported, 2);
        assert_eq!(stats.routes_imported, 1);
        assert_eq!(stats.errors, 2);
        assert_eq!(graph.shortest_path(v(0), v(1)), vec![v(0), v(1)]);
    }

    #[test]
    fn test_missing_file() {
        let mut graph = Graph::new(0);
        let result = NetworkImporter::new(&mut graph).import_stations_csv("/nonexistent/stations.csv");
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
