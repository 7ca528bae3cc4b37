//! # downgrade-source - Python 源码降级工具
//!
//! 调用 lib3to6 把新语法的 Python 源码改写为旧版本可运行的源码，
//! 可选使用 black 重新格式化，仅在内容变化时写入输出。
//!
//! ## 退出码
//! - `0` - 成功，没有输出变化
//! - `1` - 成功，至少写入了一个文件
//! - `2` - 用法或参数错误
//! - `3` - 运行失败（检查错误、I/O、外部命令）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (收集、规划、顺序执行)
//!   │     ├── transpile/ (lib3to6 后端与插件表)
//!   │     └── format/    (black 后端)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod format;
mod transpile;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(status) => std::process::exit(status.exit_code()),
        Err(e) => {
            utils::output::print_error(&format!("{}", e));
            std::process::exit(e.exit_code());
        }
    }
}
