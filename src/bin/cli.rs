//! TransitGraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::{anyhow, Context as _};
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use transitgraph::cli::{check_vertical_display, execute_line, CommandCompleter, CommandResult, PrintMode, Printer};
use transitgraph::config::{ForestEdges, GraphConfig, RouteMode, DEFAULT_MAX_VERTICES};
use transitgraph::graph::Graph;
use transitgraph::history::Session;
use transitgraph::import::NetworkImporter;
use transitgraph::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "transitgraph-cli")]
#[command(about = "TransitGraph 交通网络命令行工具")]
#[command(version)]
struct Args {
    /// 初始顶点数
    #[arg(short, long, default_value = "0")]
    capacity: usize,

    /// 顶点数上限
    #[arg(long, default_value_t = DEFAULT_MAX_VERTICES)]
    max_vertices: usize,

    /// 线路语义: directed 或 symmetric
    #[arg(short, long, default_value = "directed")]
    mode: RouteMode,

    /// 生成森林候选边: ascending（source < destination）或 weak（全部线路）
    #[arg(long, default_value = "ascending")]
    forest_edges: ForestEdges,

    /// 站点 CSV 文件 (id,name)
    #[arg(long)]
    stations: Option<String>,

    /// 线路 CSV 文件 (source,destination,weight)
    #[arg(long)]
    routes: Option<String>,

    /// JSON Lines 网络文件
    #[arg(long)]
    network: Option<String>,

    /// 导入线路时同时插入反向线路
    #[arg(long)]
    symmetric_import: bool,

    /// 执行命令后退出（多条命令以 ';' 分隔）
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志级别或过滤指令
    #[arg(long)]
    log_level: Option<String>,

    /// JSON 格式日志
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose, args.log_level.as_deref(), args.log_json)
        .map_err(|e| anyhow!("日志初始化失败: {}", e))?;

    let config = GraphConfig::new()
        .with_capacity(args.capacity)
        .with_max_vertices(args.max_vertices)
        .with_route_mode(args.mode)
        .with_forest_edges(args.forest_edges);
    let mut graph = Graph::try_with_config(config).context("无效的图配置")?;
    load_network(&mut graph, &args)?;

    let mut session = Session::new(graph);

    // 单次执行模式
    if let Some(commands) = &args.execute {
        let printer = Printer::default();
        for line in commands.split(';') {
            if report(execute_line(&mut session, line, &printer)) {
                break;
            }
        }
        return Ok(());
    }

    println!("TransitGraph CLI - 交通网络图引擎");
    println!("=================================");
    println!("  站点数: {}", session.graph().station_count());
    println!("  线路数: {}", session.graph().route_count());
    println!("  线路模式: {}", session.graph().route_mode());
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl = Editor::<CommandCompleter, DefaultHistory>::new()?;
    rl.set_helper(Some(CommandCompleter::new()));

    loop {
        match rl.readline("transitgraph> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;

                let (input, vertical) = check_vertical_display(&line);
                let printer = if vertical {
                    Printer::new(PrintMode::Vertical)
                } else {
                    Printer::default()
                };

                if report(execute_line(&mut session, &input, &printer)) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("再见！");
    Ok(())
}

/// 按参数导入站点和线路
fn load_network(graph: &mut Graph, args: &Args) -> anyhow::Result<()> {
    let mut importer = NetworkImporter::new(graph).with_symmetric(args.symmetric_import);

    if let Some(path) = &args.stations {
        let stats = importer
            .import_stations_csv(path)
            .with_context(|| format!("导入站点失败: {}", path))?;
        println!(
            "已导入 {} 个站点（{} 个错误，耗时 {} ms）",
            stats.stations_imported, stats.errors, stats.duration_ms
        );
    }

    if let Some(path) = &args.routes {
        let stats = importer
            .import_routes_csv(path)
            .with_context(|| format!("导入线路失败: {}", path))?;
        println!(
            "已导入 {} 条线路（{} 个错误，耗时 {} ms）",
            stats.routes_imported, stats.errors, stats.duration_ms
        );
    }

    if let Some(path) = &args.network {
        let stats = importer
            .import_jsonl(path)
            .with_context(|| format!("导入网络失败: {}", path))?;
        println!(
            "已导入 {} 个站点、{} 条线路（{} 个错误，耗时 {} ms）",
            stats.stations_imported, stats.routes_imported, stats.errors, stats.duration_ms
        );
    }

    Ok(())
}

/// 输出命令结果；返回 true 表示退出
fn report(result: CommandResult) -> bool {
    match result {
        CommandResult::Continue => false,
        CommandResult::Exit => true,
        CommandResult::Message(msg) => {
            println!("{}", msg);
            false
        }
        CommandResult::Error(err) => {
            eprintln!("{} {}", "错误:".red().bold(), err);
            false
        }
    }
}
