//! # downgrade 命令实现
//!
//! 批量把 Python 源码降级到目标版本。
//!
//! ## 流程
//! 1. 校验跳过列表、目标版本、文件列表与包路径（出错时不读写任何文件）
//! 2. 展开目录输入并规划每个文件的输出路径
//! 3. 顺序转译、格式化、按内容差异写入
//!
//! ## 依赖关系
//! - 使用 `cli/mod.rs` 定义的参数
//! - 使用 `transpile/`, `format/`, `batch/`
//! - 使用 `utils/output.rs`

use super::RunStatus;
use crate::batch::{plan_jobs, BatchRunner, DowngradeJob, FileCollector, RunSettings};
use crate::cli::{Cli, OutputTree};
use crate::error::{DowngradeError, Result};
use crate::format::{Black, Formatter};
use crate::transpile::{validate_target_version, Lib3to6, PluginKind, PluginRegistry, Transpiler};
use crate::utils::output;

use std::path::PathBuf;

/// 校验通过后的执行计划
#[derive(Debug)]
pub struct DowngradePlan {
    pub jobs: Vec<DowngradeJob>,
    pub settings: RunSettings,
    pub pkg_path: PathBuf,
    pub tree: OutputTree,
}

/// 执行 downgrade 命令
pub fn execute(cli: Cli, registry: &PluginRegistry) -> Result<RunStatus> {
    let plan = prepare(&cli, registry)?;

    if plan.jobs.is_empty() {
        output::print_warning(&format!("No files matched '{}'", cli.pattern));
        return Ok(RunStatus::Unchanged);
    }

    output::print_info(&format!(
        "Downgrading {} file(s) to Python {} under {}",
        plan.jobs.len(),
        plan.settings.target_version,
        plan.pkg_path.join(plan.tree.dir_name()).display()
    ));

    let transpiler = Lib3to6::new(cli.python.as_str());
    let black = Black::new(cli.black.as_str());
    let formatter: Option<&dyn Formatter> = if cli.no_black {
        None
    } else {
        Some(&black as &dyn Formatter)
    };

    run_plan(&plan, &transpiler, formatter)
}

/// 校验参数并规划作业
pub fn prepare(cli: &Cli, registry: &PluginRegistry) -> Result<DowngradePlan> {
    let checkers = registry.enabled(PluginKind::Checker, &cli.skip_checkers)?;
    let fixers = registry.enabled(PluginKind::Fixer, &cli.skip_fixers)?;
    validate_target_version(&cli.target_version)?;

    if cli.files.is_empty() {
        return Err(DowngradeError::NoFiles);
    }

    let pkg_path = cli.pkg_path.clone().ok_or(DowngradeError::MissingPkgPath)?;

    let files = FileCollector::new(&cli.pattern)?
        .exclude(pkg_path.join(cli.output_tree.dir_name()))
        .collect(&cli.files)?;
    let jobs = plan_jobs(&files, &pkg_path, cli.output_tree)?;

    log::debug!(
        "{} checker(s), {} fixer(s) enabled; {} job(s) planned",
        checkers.len(),
        fixers.len(),
        jobs.len()
    );

    Ok(DowngradePlan {
        jobs,
        settings: RunSettings {
            checkers,
            fixers,
            target_version: cli.target_version.clone(),
            install_requires: cli.install_requires.clone(),
        },
        pkg_path,
        tree: cli.output_tree,
    })
}

/// 用给定后端执行计划
pub fn run_plan(
    plan: &DowngradePlan,
    transpiler: &dyn Transpiler,
    formatter: Option<&dyn Formatter>,
) -> Result<RunStatus> {
    let mut runner = BatchRunner::new(
        transpiler,
        plan.settings.clone(),
        plan.pkg_path.clone(),
        plan.tree,
    );
    if let Some(formatter) = formatter {
        runner = runner.with_formatter(formatter);
    }

    let summary = runner.run(&plan.jobs)?;

    output::print_done(&format!(
        "{} file(s) processed: {} written, {} unchanged",
        summary.total(),
        summary.written.len(),
        summary.unchanged
    ));

    Ok(if summary.changed() {
        RunStatus::Changed
    } else {
        RunStatus::Unchanged
    })
}
