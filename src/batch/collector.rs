//! # 文件收集器
//!
//! 把命令行给出的输入路径展开为待处理文件列表。
//!
//! ## 功能
//! - 文件参数原样保留，保持命令行顺序
//! - 目录参数递归搜索，按 glob 模式匹配文件名，结果排序
//! - 跳过输出子目录（避免把上次的产物再次作为输入）
//!
//! ## 依赖关系
//! - 被 `commands/downgrade.rs` 调用
//! - 使用 `walkdir` 遍历目录, `glob` 匹配文件名

use super::job::normalize;
use crate::error::{DowngradeError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 文件名匹配模式
    pattern: glob::Pattern,
    /// 需要排除的目录
    excluded: Vec<PathBuf>,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = glob::Pattern::new(pattern).map_err(|e| {
            DowngradeError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
        })?;
        Ok(Self {
            pattern,
            excluded: Vec::new(),
        })
    }

    /// 排除某个目录（及其子目录）
    pub fn exclude(mut self, dir: PathBuf) -> Self {
        self.excluded.push(normalize(&dir));
        self
    }

    /// 收集所有输入文件
    pub fn collect(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            if input.is_file() {
                files.push(input.clone());
            } else if input.is_dir() {
                files.extend(self.walk(input));
            } else {
                return Err(DowngradeError::FileNotFound {
                    path: input.display().to_string(),
                });
            }
        }

        Ok(files)
    }

    /// 递归搜索目录
    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|name| self.pattern.matches(name))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        found.sort();
        log::debug!("collected {} file(s) under {}", found.len(), dir.display());
        found
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.excluded.iter().any(|dir| path.starts_with(dir))
    }
}
