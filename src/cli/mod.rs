//! 交互式命令行
//!
//! 命令解析执行、结果打印与 Tab 补全

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{execute, execute_line, parse_command, Command, CommandResult};
pub use completer::CommandCompleter;
pub use printer::{check_vertical_display, PrintMode, Printer};
