//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 顶层命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "info",
    "station", "route", "stations", "connections",
    "bfs", "dfs", "path", "mst", "forest", "cycle",
    "undo", "history", "report", "mode",
];

/// 子命令映射
fn get_sub_commands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "station" | "s" => Some(&["add", "del"]),
        "route" | "r" => Some(&["add", "del"]),
        "report" => Some(&["json"]),
        "history" => Some(&["clear"]),
        "mode" => Some(&["directed", "symmetric"]),
        _ => None,
    }
}

fn pairs<'a>(candidates: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
    candidates
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

/// TransitGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 补全候选及替换起点
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

        match (words.len(), at_word_end) {
            (0, _) => (pos, pairs(COMMANDS.iter())),
            (1, true) => {
                let current = words[0].to_lowercase();
                let start = pos - words[0].len();
                (start, pairs(COMMANDS.iter().filter(|c| c.starts_with(&current))))
            }
            (1, false) => {
                let command = words[0].to_lowercase();
                match get_sub_commands(&command) {
                    Some(subs) => (pos, pairs(subs.iter())),
                    None => (pos, Vec::new()),
                }
            }
            (2, true) => {
                let command = words[0].to_lowercase();
                let current = words[1].to_lowercase();
                let start = pos - words[1].len();
                match get_sub_commands(&command) {
                    Some(subs) => (start, pairs(subs.iter().filter(|s| s.starts_with(&current)))),
                    None => (start, Vec::new()),
                }
            }
            // 站点 ID、权重等参数不补全
            _ => (pos, Vec::new()),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
