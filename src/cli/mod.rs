//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! 历史上的 downgrade / untype 两个入口合并为一个命令，
//! 通过 `--output-tree` 选择输出子目录，旧的短别名 (`--sc`, `--sf`, `--ir`) 保留。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/`

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// 默认目标版本
pub const DEFAULT_TARGET_VERSION: &str = "3.5";

/// 输出子目录
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputTree {
    /// Write into `<pkg>/downgraded/` and keep an `__init__.py` marker there
    #[default]
    Downgraded,
    /// Write into `<pkg>/untyped/`
    Untyped,
}

impl OutputTree {
    /// 子目录名
    pub fn dir_name(self) -> &'static str {
        match self {
            OutputTree::Downgraded => "downgraded",
            OutputTree::Untyped => "untyped",
        }
    }

    /// 是否在输出根目录放置 `__init__.py`
    pub fn writes_package_marker(self) -> bool {
        matches!(self, OutputTree::Downgraded)
    }
}

impl std::fmt::Display for OutputTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// downgrade-source - 将 Python 源码降级到旧版本语法
#[derive(Parser, Debug)]
#[command(name = "downgrade-source")]
#[command(version)]
#[command(
    about = "Downgrade Python sources to an older language version",
    long_about = None
)]
pub struct Cli {
    /// The target version to translate the source code into
    #[arg(
        long,
        env = "DOWNGRADE_TARGET_VERSION",
        default_value = DEFAULT_TARGET_VERSION
    )]
    pub target_version: String,

    /// Path to package. For example, `--pkg-path=src/mypackage`
    #[arg(long, env = "DOWNGRADE_PKG_PATH")]
    pub pkg_path: Option<PathBuf>,

    /// List the available checkers and exit
    #[arg(long, default_value_t = false)]
    pub list_checkers: bool,

    /// Checker to skip (repeatable). See --list-checkers
    #[arg(
        long = "skip-checker",
        visible_alias = "sc",
        value_name = "NAME",
        action = ArgAction::Append
    )]
    pub skip_checkers: Vec<String>,

    /// List the available fixers and exit
    #[arg(long, default_value_t = false)]
    pub list_fixers: bool,

    /// Fixer to skip (repeatable). See --list-fixers
    #[arg(
        long = "skip-fixer",
        visible_alias = "sf",
        value_name = "NAME",
        action = ArgAction::Append
    )]
    pub skip_fixers: Vec<String>,

    /// Install requirement passed through to lib3to6 (repeatable)
    #[arg(
        long = "install-requires",
        visible_alias = "ir",
        value_name = "REQ",
        action = ArgAction::Append
    )]
    pub install_requires: Vec<String>,

    /// Don't format the downgraded code with black
    #[arg(long, default_value_t = false)]
    pub no_black: bool,

    /// Output subtree under the package path
    #[arg(long, value_enum, default_value_t = OutputTree::Downgraded)]
    pub output_tree: OutputTree,

    /// Glob pattern for files collected from directory inputs
    #[arg(long, default_value = "*.py")]
    pub pattern: String,

    /// Python interpreter with lib3to6 installed
    #[arg(long, env = "DOWNGRADE_PYTHON", default_value = "python3")]
    pub python: String,

    /// black executable
    #[arg(long, env = "DOWNGRADE_BLACK", default_value = "black")]
    pub black: String,

    /// Space separated list of files (directories are searched recursively)
    pub files: Vec<PathBuf>,
}
