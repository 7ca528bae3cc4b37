//! # list 命令实现
//!
//! 打印可用的 checker / fixer 名称。

use crate::transpile::{PluginKind, PluginRegistry};

/// 执行 `--list-checkers` / `--list-fixers`
pub fn execute(registry: &PluginRegistry, kind: PluginKind) {
    print!("{}", registry.listing(kind));
}
