//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::{PathResult, SpanningForest};
use crate::graph::{Graph, VertexId};
use crate::history::ActionHistory;
use crate::report::NetworkReport;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式 (\G)
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 按当前模式输出行数据
    pub fn format_rows(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        if rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} row(s) in set\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 站点标签：已登记时带名称
    fn label(graph: &Graph, id: VertexId) -> String {
        match graph.station_name(id) {
            Some(name) => format!("{}({})", id, name),
            None => id.to_string(),
        }
    }

    /// 访问顺序，如 `0(A) -> 1(B)`
    pub fn format_order(&self, graph: &Graph, order: &[VertexId]) -> String {
        order
            .iter()
            .map(|&id| Self::label(graph, id))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// 所有站点
    pub fn format_stations(&self, graph: &Graph) -> String {
        let rows: Vec<Vec<String>> = graph
            .stations()
            .iter()
            .map(|s| vec![s.id().to_string(), s.name().to_string()])
            .collect();
        self.format_rows(&["ID", "Name"], &rows)
    }

    /// 所有线路
    pub fn format_connections(&self, graph: &Graph) -> String {
        let rows: Vec<Vec<String>> = graph
            .routes()
            .iter()
            .map(|e| {
                vec![
                    Self::label(graph, e.source),
                    Self::label(graph, e.destination),
                    e.weight.to_string(),
                ]
            })
            .collect();
        self.format_rows(&["From", "To", "Weight"], &rows)
    }

    /// 最短路径
    pub fn format_path(&self, graph: &Graph, path: &PathResult) -> String {
        format!(
            "路径: {}\n总权重: {} ({} 段)",
            self.format_order(graph, &path.vertices),
            path.total_weight,
            path.hops
        )
    }

    /// 最小生成森林
    pub fn format_forest(&self, graph: &Graph, forest: &SpanningForest) -> String {
        if forest.edges.is_empty() {
            return "最小生成森林为空（图中没有可用线路）\n".to_string();
        }

        let rows: Vec<Vec<String>> = forest
            .edges
            .iter()
            .map(|e| {
                vec![
                    Self::label(graph, e.source),
                    Self::label(graph, e.destination),
                    e.weight.to_string(),
                ]
            })
            .collect();

        format!(
            "{}总权重: {}，连通分量: {}\n",
            self.format_rows(&["From", "To", "Weight"], &rows),
            forest.total_weight,
            forest.component_count
        )
    }

    /// 操作历史（从新到旧）
    pub fn format_history(&self, history: &ActionHistory) -> String {
        let rows: Vec<Vec<String>> = history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                vec![
                    (i + 1).to_string(),
                    entry.action.to_string(),
                    entry.recorded_at.format("%H:%M:%S").to_string(),
                ]
            })
            .collect();
        self.format_rows(&["#", "Action", "Time"], &rows)
    }

    /// 网络报告
    pub fn format_report(&self, graph: &Graph, report: &NetworkReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Route Mode", report.route_mode.to_string()]);
        table.add_row(row!["Forest Edges", report.forest_edges.to_string()]);
        table.add_row(row!["Stations", report.station_count.to_string()]);
        table.add_row(row!["Vertices", report.vertex_count.to_string()]);
        table.add_row(row!["Routes", report.route_count.to_string()]);
        table.add_row(row!["Total Route Weight", report.total_route_weight.to_string()]);
        table.add_row(row![
            "Spanning Forest Weight",
            report.spanning_forest.total_weight.to_string()
        ]);
        table.add_row(row!["Components", report.component_count().to_string()]);
        table.add_row(row!["Has Cycle", report.has_cycle.to_string()]);

        let isolated = report
            .isolated_stations
            .iter()
            .map(|&id| Self::label(graph, id))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(row!["Isolated Stations", isolated]);

        let busiest = report
            .busiest_station
            .as_ref()
            .map(|b| format!("{}({}), degree {}", b.id, b.name, b.degree))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row!["Busiest Station", busiest]);

        table.to_string()
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Station Count", graph.station_count().to_string()]);
        table.add_row(row!["Vertex Count", graph.num_vertices().to_string()]);
        table.add_row(row!["Route Count", graph.route_count().to_string()]);
        table.add_row(row!["Route Mode", graph.route_mode().to_string()]);
        table.add_row(row!["Forest Edges", graph.forest_edges().to_string()]);
        table.to_string()
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                  TransitGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                   显示帮助
  quit, exit, q                退出程序
  stats, info                  显示图统计信息

站点与线路:
  station add <ID> <名称>      添加站点（ID 超出范围时自动扩容）
  station del <ID>             删除站点及其全部线路
  route add <起点> <终点> <权重>
                               添加线路（已存在时更新权重）
  route del <起点> <终点>      删除线路
  stations, ls                 列出所有站点
  connections, conn            列出所有线路

图算法:
  bfs <起点>                   广度优先遍历
  dfs <起点>                   深度优先遍历
  path <起点> <终点>           Dijkstra 最短路径
  mst, forest                  最小生成森林（Kruskal）
  cycle                        环检测

历史与报告:
  undo                         撤销最近一次修改
  history                      查看操作历史
  history clear                清空操作历史
  report [json]                网络报告
  mode [directed|symmetric]    查看或切换线路模式

提示: 在命令末尾加 \G 可垂直显示表格结果
═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

/// 检查输入是否以 \G 结尾（垂直显示）
pub fn check_vertical_display(input: &str) -> (String, bool) {
    let trimmed = input.trim();
    if trimmed.ends_with("\\G") || trimmed.ends_with("\\g") {
        let clean = trimmed[..trimmed.len() - 2].trim().to_string();
        (clean, true)
    } else {
        (trimmed.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new(0);
        graph.add_station(VertexId::new(0), "Harbor").unwrap();
        graph.add_station(VertexId::new(1), "Market").unwrap();
        graph.add_route(VertexId::new(0), VertexId::new(1), 4).unwrap();
        graph
    }

    #[test]
    fn test_format_order_uses_names() {
        let graph = sample_graph();
        let printer = Printer::default();
        let order = [VertexId::new(0), VertexId::new(1)];

        assert_eq!(printer.format_order(&graph, &order), "0(Harbor) -> 1(Market)");
    }

    #[test]
    fn test_table_and_vertical_modes() {
        let graph = sample_graph();
        let mut printer = Printer::default();

        let table = printer.format_stations(&graph);
        assert!(table.contains("Harbor"));
        assert!(table.ends_with("2 row(s) in set\n"));

        printer.set_mode(PrintMode::Vertical);
        let vertical = printer.format_connections(&graph);
        assert!(vertical.contains("*************************** 1. row"));
        assert!(vertical.contains("Weight: 4"));
    }

    #[test]
    fn test_empty_set() {
        let printer = Printer::default();
        assert_eq!(printer.format_stations(&Graph::new(0)), "Empty set\n");
    }

    #[test]
    fn test_check_vertical_display() {
        assert_eq!(check_vertical_display("stations\\G"), ("stations".to_string(), true));
        assert_eq!(check_vertical_display(" ls "), ("ls".to_string(), false));
    }
}
