//! # 命令执行模块
//!
//! 根据解析后的参数选择执行插件列表或批量降级。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `transpile/`, `batch/`, `utils/`
//! - 子模块: list, downgrade

pub mod downgrade;
pub mod list;

use crate::cli::Cli;
use crate::error::Result;
use crate::transpile::{PluginKind, PluginRegistry};

/// 一次成功运行的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// 没有任何输出变化
    Unchanged,
    /// 至少一个输出文件被创建或修改
    Changed,
}

impl RunStatus {
    /// 进程退出码
    pub fn exit_code(self) -> i32 {
        match self {
            RunStatus::Unchanged => 0,
            RunStatus::Changed => 1,
        }
    }
}

/// 执行命令
pub fn run(cli: Cli) -> Result<RunStatus> {
    let registry = PluginRegistry::lib3to6();

    if cli.list_checkers || cli.list_fixers {
        if cli.list_checkers {
            list::execute(&registry, PluginKind::Checker);
        }
        if cli.list_fixers {
            list::execute(&registry, PluginKind::Fixer);
        }
        return Ok(RunStatus::Unchanged);
    }

    downgrade::execute(cli, &registry)
}
