//! 命令解析与执行
//!
//! 交互式命令行和 `-e` 单次执行共用同一套解析和执行逻辑

use super::printer::Printer;
use crate::algorithm::{PathFinder, SpanningForest};
use crate::config::RouteMode;
use crate::error::{Error, Result};
use crate::graph::{VertexId, Weight};
use crate::history::Session;
use crate::report::NetworkReport;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 已解析的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Stats,
    AddStation {
        id: VertexId,
        name: String,
    },
    DeleteStation {
        id: VertexId,
    },
    AddRoute {
        source: VertexId,
        destination: VertexId,
        weight: Weight,
    },
    DeleteRoute {
        source: VertexId,
        destination: VertexId,
    },
    Stations,
    Connections,
    Bfs(VertexId),
    Dfs(VertexId),
    Path {
        source: VertexId,
        destination: VertexId,
    },
    Mst,
    Cycle,
    Undo,
    History,
    ClearHistory,
    Report {
        json: bool,
    },
    Mode(Option<RouteMode>),
}

/// 解析一行输入
pub fn parse_command(input: &str) -> Result<Command> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Err(Error::CommandError("空命令".to_string()));
    };
    let cmd = first.to_lowercase();
    let sub = parts.get(1).map(|s| s.to_lowercase());

    let command = match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "stats" | "info" => Command::Stats,

        "station" | "s" => match sub.as_deref() {
            Some("add") => {
                let id = parse_id(parts.get(2), "用法: station add <ID> <名称>")?;
                let name = parts.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
                if name.is_empty() {
                    return Err(usage("用法: station add <ID> <名称>"));
                }
                Command::AddStation { id, name }
            }
            Some("del" | "delete" | "rm") => Command::DeleteStation {
                id: parse_id(parts.get(2), "用法: station del <ID>")?,
            },
            _ => return Err(usage("用法: station add <ID> <名称> | station del <ID>")),
        },

        "route" | "r" => match sub.as_deref() {
            Some("add") => {
                const USAGE: &str = "用法: route add <起点> <终点> <权重>";
                Command::AddRoute {
                    source: parse_id(parts.get(2), USAGE)?,
                    destination: parse_id(parts.get(3), USAGE)?,
                    weight: parse_weight(parts.get(4), USAGE)?,
                }
            }
            Some("del" | "delete" | "rm") => {
                const USAGE: &str = "用法: route del <起点> <终点>";
                Command::DeleteRoute {
                    source: parse_id(parts.get(2), USAGE)?,
                    destination: parse_id(parts.get(3), USAGE)?,
                }
            }
            _ => return Err(usage("用法: route add <起点> <终点> <权重> | route del <起点> <终点>")),
        },

        "stations" | "ls" => Command::Stations,
        "connections" | "conn" => Command::Connections,
        "bfs" => Command::Bfs(parse_id(parts.get(1), "用法: bfs <起点>")?),
        "dfs" => Command::Dfs(parse_id(parts.get(1), "用法: dfs <起点>")?),
        "path" | "shortest" => {
            const USAGE: &str = "用法: path <起点> <终点>";
            Command::Path {
                source: parse_id(parts.get(1), USAGE)?,
                destination: parse_id(parts.get(2), USAGE)?,
            }
        }
        "mst" | "forest" => Command::Mst,
        "cycle" => Command::Cycle,
        "undo" => Command::Undo,
        "history" => match sub.as_deref() {
            None => Command::History,
            Some("clear") => Command::ClearHistory,
            _ => return Err(usage("用法: history [clear]")),
        },
        "report" => Command::Report {
            json: sub.as_deref() == Some("json"),
        },
        "mode" => match parts.get(1) {
            None => Command::Mode(None),
            Some(m) => Command::Mode(Some(m.parse().map_err(Error::CommandError)?)),
        },

        _ => {
            return Err(Error::CommandError(format!(
                "未知命令: {}。输入 'help' 查看帮助。",
                cmd
            )))
        }
    };

    Ok(command)
}

fn usage(text: &str) -> Error {
    Error::CommandError(text.to_string())
}

fn parse_id(token: Option<&&str>, usage_text: &str) -> Result<VertexId> {
    let token = token.ok_or_else(|| usage(usage_text))?;
    token
        .parse::<usize>()
        .map(VertexId::new)
        .map_err(|_| Error::CommandError(format!("无效的站点 ID: {}", token)))
}

fn parse_weight(token: Option<&&str>, usage_text: &str) -> Result<Weight> {
    let token = token.ok_or_else(|| usage(usage_text))?;
    token
        .parse::<Weight>()
        .map_err(|_| Error::CommandError(format!("权重必须是非负整数: {}", token)))
}

/// 在会话上执行命令
pub fn execute(session: &mut Session, command: Command, printer: &Printer) -> CommandResult {
    match run(session, command, printer) {
        Ok(result) => result,
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// 解析并执行一行输入
pub fn execute_line(session: &mut Session, input: &str, printer: &Printer) -> CommandResult {
    if input.trim().is_empty() {
        return CommandResult::Continue;
    }
    match parse_command(input) {
        Ok(command) => execute(session, command, printer),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn run(session: &mut Session, command: Command, printer: &Printer) -> Result<CommandResult> {
    let message = match command {
        Command::Help => Printer::print_help(),
        Command::Quit => return Ok(CommandResult::Exit),
        Command::Stats => printer.print_stats(session.graph()),

        Command::AddStation { id, name } => {
            session.add_station(id, name.clone())?;
            format!("站点 '{}' (ID: {}) 已添加", name, id)
        }
        Command::DeleteStation { id } => {
            let deleted = session.delete_station(id)?;
            format!("站点 {} 已删除，移除 {} 条线路", id, deleted.routes.len())
        }
        Command::AddRoute {
            source,
            destination,
            weight,
        } => match session.add_route(source, destination, weight)? {
            Some(old) => format!(
                "线路 {} -> {} 已存在，权重 {} 更新为 {}",
                source, destination, old, weight
            ),
            None => format!("已添加线路 {} -> {} (权重 {})", source, destination, weight),
        },
        Command::DeleteRoute {
            source,
            destination,
        } => match session.delete_route(source, destination)? {
            Some(_) => format!("已删除线路 {} -> {}", source, destination),
            None => format!("线路 {} -> {} 不存在", source, destination),
        },

        Command::Stations => printer.format_stations(session.graph()),
        Command::Connections => printer.format_connections(session.graph()),

        Command::Bfs(start) => {
            traversal_message("BFS", start, &session.graph().bfs(start), session, printer)
        }
        Command::Dfs(start) => {
            traversal_message("DFS", start, &session.graph().dfs(start), session, printer)
        }
        Command::Path {
            source,
            destination,
        } => match PathFinder::new(session.graph()).dijkstra(source, destination) {
            Some(path) => printer.format_path(session.graph(), &path),
            None => format!("站点 {} 到 {} 不存在路径", source, destination),
        },
        Command::Mst => printer.format_forest(session.graph(), &SpanningForest::build(session.graph())),
        Command::Cycle => {
            if session.graph().detect_cycle() {
                "检测到环".to_string()
            } else {
                "未检测到环".to_string()
            }
        }

        Command::Undo => format!("已撤销: {}", session.undo()?),
        Command::History => printer.format_history(session.history()),
        Command::ClearHistory => {
            let cleared = session.history().len();
            session.clear_history();
            format!("已清空 {} 条操作历史", cleared)
        }

        Command::Report { json } => {
            let report = NetworkReport::generate(session.graph());
            if json {
                report.to_json()?
            } else {
                printer.format_report(session.graph(), &report)
            }
        }
        Command::Mode(None) => format!("当前线路模式: {}", session.graph().route_mode()),
        Command::Mode(Some(mode)) => {
            session.set_route_mode(mode);
            format!("线路模式已切换为: {}", mode)
        }
    };

    Ok(CommandResult::Message(message))
}

fn traversal_message(
    label: &str,
    start: VertexId,
    order: &[VertexId],
    session: &Session,
    printer: &Printer,
) -> String {
    if order.is_empty() {
        format!("起点 {} 不在图中", start)
    } else {
        format!(
            "{} 从站点 {} 开始: {}",
            label,
            start,
            printer.format_order(session.graph(), order)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn run_lines(session: &mut Session, lines: &[&str]) -> Vec<CommandResult> {
        let printer = Printer::default();
        lines
            .iter()
            .map(|line| execute_line(session, line, &printer))
            .collect()
    }

    fn message(result: &CommandResult) -> &str {
        match result {
            CommandResult::Message(m) => m,
            other => panic!("expected message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("station add 3 Grand Central").unwrap(),
            Command::AddStation {
                id: v(3),
                name: "Grand Central".to_string()
            }
        );
        assert_eq!(
            parse_command("ROUTE add 0 1 15").unwrap(),
            Command::AddRoute {
                source: v(0),
                destination: v(1),
                weight: 15
            }
        );
        assert_eq!(parse_command("bfs 2").unwrap(), Command::Bfs(v(2)));
        assert_eq!(parse_command("report json").unwrap(), Command::Report { json: true });
        assert_eq!(
            parse_command("mode symmetric").unwrap(),
            Command::Mode(Some(RouteMode::Symmetric))
        );
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("history").unwrap(), Command::History);
        assert_eq!(parse_command("history clear").unwrap(), Command::ClearHistory);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("station add 1").is_err());
        assert!(parse_command("route add 0 1 -4").is_err());
        assert!(parse_command("route add 0 x 4").is_err());
        assert!(parse_command("path 1").is_err());
        assert!(parse_command("mode sideways").is_err());
        assert!(parse_command("teleport 1 2").is_err());
        assert!(parse_command("history wipe").is_err());
    }

    #[test]
    fn test_session_workflow() {
        let mut session = Session::new(Graph::new(0));
        let results = run_lines(
            &mut session,
            &[
                "station add 0 A",
                "station add 1 B",
                "station add 2 C",
                "route add 0 1 10",
                "route add 1 2 15",
                "route add 0 2 20",
                "path 0 2",
            ],
        );

        assert!(results
            .iter()
            .all(|r| matches!(r, CommandResult::Message(_))));
        let path = message(&results[6]);
        assert!(path.contains("0(A) -> 2(C)"), "{}", path);
        assert!(path.contains("20"), "{}", path);

        let results = run_lines(&mut session, &["route add 0 2 30", "undo"]);
        assert!(message(&results[0]).contains("更新为 30"));
        assert_eq!(session.graph().route_weight(v(0), v(2)), Some(20));
    }

    #[test]
    fn test_soft_failures_surface_as_errors() {
        let mut session = Session::new(Graph::new(0));
        let results = run_lines(
            &mut session,
            &["station add 0 A", "station add 0 B", "route add 0 5 1", "undo", "undo"],
        );

        assert!(matches!(results[1], CommandResult::Error(_)));
        assert!(matches!(results[2], CommandResult::Error(_)));
        assert!(matches!(results[3], CommandResult::Message(_)));
        assert!(matches!(results[4], CommandResult::Error(_)));
        assert_eq!(session.graph().station_count(), 0);
    }

    #[test]
    fn test_traversal_and_cycle_commands() {
        let mut session = Session::new(Graph::new(3));
        let results = run_lines(
            &mut session,
            &[
                "route add 0 1 1",
                "route add 1 2 1",
                "bfs 0",
                "dfs 9",
                "cycle",
                "route add 2 0 1",
                "cycle",
                "path 2 9",
            ],
        );

        assert_eq!(message(&results[2]), "BFS 从站点 0 开始: 0 -> 1 -> 2");
        assert_eq!(message(&results[3]), "起点 9 不在图中");
        assert_eq!(message(&results[4]), "未检测到环");
        assert_eq!(message(&results[6]), "检测到环");
        assert_eq!(message(&results[7]), "站点 2 到 9 不存在路径");
    }

    #[test]
    fn test_mode_switch_affects_cycle() {
        let mut session = Session::new(Graph::new(2));
        let results = run_lines(
            &mut session,
            &["route add 0 1 2", "route add 1 0 2", "cycle", "mode symmetric", "cycle", "mode"],
        );

        assert_eq!(message(&results[2]), "检测到环");
        assert_eq!(message(&results[4]), "未检测到环");
        assert_eq!(message(&results[5]), "当前线路模式: symmetric");
    }

    #[test]
    fn test_history_clear_command() {
        let mut session = Session::new(Graph::new(0));
        let results = run_lines(
            &mut session,
            &["station add 0 A", "station add 1 B", "history clear", "undo"],
        );

        assert_eq!(message(&results[2]), "已清空 2 条操作历史");
        assert!(matches!(results[3], CommandResult::Error(_)));
        assert!(session.history().is_empty());
        assert_eq!(session.graph().station_count(), 2);
    }

    #[test]
    fn test_quit_and_blank() {
        let mut session = Session::default();
        let results = run_lines(&mut session, &["   ", "exit"]);
        assert_eq!(results, vec![CommandResult::Continue, CommandResult::Exit]);
    }
}
