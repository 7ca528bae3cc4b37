//! # 批量执行器
//!
//! 按顺序逐个处理作业：读取、转译、格式化、比较、写入。
//!
//! ## 功能
//! - 单线程顺序执行，保持输入顺序
//! - 检查失败立即中止整个批次（后续文件不再读取）
//! - 仅当内容变化时写入输出文件
//! - 进度条显示
//!
//! ## 依赖关系
//! - 被 `commands/downgrade.rs` 调用
//! - 使用 `transpile::Transpiler`, `format::Formatter`
//! - 使用 `utils/progress.rs` 创建进度条

use super::job::DowngradeJob;
use crate::cli::OutputTree;
use crate::error::{DowngradeError, Result};
use crate::format::{format_code, FormatTarget, Formatter};
use crate::transpile::{BuildContext, Transpiler};
use crate::utils::{output, progress};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 输出根目录下的包标记文件
const PACKAGE_MARKER: &str = "__init__.py";

/// 单个作业的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// 写入了新内容
    Written,
    /// 内容未变，未写入
    Unchanged,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct RunSummary {
    /// 写入的作业
    pub written: Vec<DowngradeJob>,
    /// 未变化数量
    pub unchanged: usize,
}

impl RunSummary {
    /// 合并处理结果
    pub fn merge(&mut self, job: &DowngradeJob, outcome: JobOutcome) {
        match outcome {
            JobOutcome::Written => self.written.push(job.clone()),
            JobOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// 是否有任何输出被创建或修改
    pub fn changed(&self) -> bool {
        !self.written.is_empty()
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged
    }
}

/// 转译参数（整个批次共享）
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub checkers: Vec<&'static str>,
    pub fixers: Vec<&'static str>,
    pub target_version: String,
    pub install_requires: Vec<String>,
}

impl RunSettings {
    fn build_context(&self, source: &Path) -> BuildContext {
        BuildContext::new(
            &self.checkers,
            &self.fixers,
            &self.target_version,
            source,
            &self.install_requires,
        )
    }
}

/// 批量执行器
pub struct BatchRunner<'a> {
    transpiler: &'a dyn Transpiler,
    /// `None` 表示跳过格式化
    formatter: Option<&'a dyn Formatter>,
    settings: RunSettings,
    pkg_path: PathBuf,
    tree: OutputTree,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(
        transpiler: &'a dyn Transpiler,
        settings: RunSettings,
        pkg_path: PathBuf,
        tree: OutputTree,
    ) -> Self {
        Self {
            transpiler,
            formatter: None,
            settings,
            pkg_path,
            tree,
        }
    }

    /// 启用格式化
    pub fn with_formatter(mut self, formatter: &'a dyn Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// 顺序处理全部作业，遇到错误立即返回
    pub fn run(&self, jobs: &[DowngradeJob]) -> Result<RunSummary> {
        let pb = progress::create_progress_bar(jobs.len() as u64, "Downgrading");
        let mut summary = RunSummary::default();

        if !jobs.is_empty() {
            self.ensure_output_root()?;
        }

        for job in jobs {
            pb.set_message(job.relative.display().to_string());
            let outcome = match self.process(job) {
                Ok(outcome) => outcome,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };

            if outcome == JobOutcome::Written {
                pb.suspend(|| {
                    output::print_conversion(
                        &job.source.display().to_string(),
                        &job.dest.display().to_string(),
                    );
                });
            }

            summary.merge(job, outcome);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(summary)
    }

    /// 创建输出根目录，需要时放置包标记文件
    fn ensure_output_root(&self) -> Result<()> {
        let root = self.pkg_path.join(self.tree.dir_name());
        create_dir(&root)?;

        if self.tree.writes_package_marker() {
            let marker = root.join(PACKAGE_MARKER);
            if !marker.exists() {
                log::debug!("creating package marker {}", marker.display());
                fs::write(&marker, "").map_err(|e| DowngradeError::FileWriteError {
                    path: marker.display().to_string(),
                    source: e,
                })?;
            }
        }
        Ok(())
    }

    /// 处理单个作业
    fn process(&self, job: &DowngradeJob) -> Result<JobOutcome> {
        if let Some(parent) = job.dest.parent() {
            create_dir(parent)?;
        }

        let previous = read_existing(&job.dest)?;
        let ctx = self.settings.build_context(&job.source);

        let source_text =
            fs::read_to_string(&job.source).map_err(|e| DowngradeError::FileReadError {
                path: job.source.display().to_string(),
                source: e,
            })?;

        log::debug!("transpiling {} -> {}", job.source.display(), job.dest.display());
        let mut text = self
            .transpiler
            .transpile(&ctx, &source_text)
            .map_err(|failure| failure.into_error(&job.source))?;

        if let Some(formatter) = self.formatter {
            let target = FormatTarget::from_version(&self.settings.target_version);
            text = format_code(formatter, &text, target);
        }

        if previous.as_deref() == Some(text.as_str()) {
            log::trace!("{} unchanged", job.dest.display());
            return Ok(JobOutcome::Unchanged);
        }

        fs::write(&job.dest, &text).map_err(|e| DowngradeError::FileWriteError {
            path: job.dest.display().to_string(),
            source: e,
        })?;
        Ok(JobOutcome::Written)
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| DowngradeError::CreateDirError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 读取已有输出；不存在时返回 `None`
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(DowngradeError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}
