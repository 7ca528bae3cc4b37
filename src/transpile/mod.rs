//! # 转译模块
//!
//! 对外部转译库 (lib3to6) 的抽象。
//!
//! ## 功能
//! - `BuildContext`: 单文件转译配置
//! - `Transpiler`: 转译后端 trait
//! - `CheckError`: 转译器拒绝输入时的结构化错误
//! - `registry`: 静态声明的 checker / fixer 名称表
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/` 使用
//! - 子模块: registry, lib3to6

pub mod lib3to6;
pub mod registry;

pub use lib3to6::Lib3to6;
pub use registry::{PluginKind, PluginRegistry};

use crate::error::{DowngradeError, Result};

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

/// 单文件转译配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    /// 启用的 checker（逗号分隔）
    pub checkers: String,
    /// 启用的 fixer（逗号分隔）
    pub fixers: String,
    pub target_version: String,
    /// 源文件名（仅用于诊断）
    pub filepath: String,
    pub install_requires: Option<String>,
}

impl BuildContext {
    /// 根据启用的插件列表构造配置
    pub fn new(
        checkers: &[&str],
        fixers: &[&str],
        target_version: &str,
        source: &Path,
        install_requires: &[String],
    ) -> Self {
        let filepath = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let joined = install_requires.join(" ");
        let joined = joined.trim();

        Self {
            checkers: checkers.join(","),
            fixers: fixers.join(","),
            target_version: target_version.to_string(),
            filepath,
            install_requires: if joined.is_empty() {
                None
            } else {
                Some(joined.to_string())
            },
        }
    }
}

/// 转译器拒绝输入（目标版本不支持的语法等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    pub message: String,
    pub lineno: Option<u32>,
}

impl CheckError {
    /// 附加文件路径与行号，生成可向上传播的错误
    pub fn annotate(self, path: &Path) -> DowngradeError {
        let mut location = path.display().to_string();
        if let Some(lineno) = self.lineno {
            location.push('@');
            location.push_str(&lineno.to_string());
        }
        DowngradeError::CheckError {
            location,
            message: self.message,
        }
    }
}

/// 转译失败
#[derive(Debug)]
pub enum TranspileFailure {
    /// 输入被 checker 拒绝
    Check(CheckError),
    /// 后端本身出错（进程启动失败、协议错误等）
    Backend(DowngradeError),
}

impl From<DowngradeError> for TranspileFailure {
    fn from(err: DowngradeError) -> Self {
        TranspileFailure::Backend(err)
    }
}

impl TranspileFailure {
    /// 转为带位置信息的统一错误
    pub fn into_error(self, path: &Path) -> DowngradeError {
        match self {
            TranspileFailure::Check(check) => check.annotate(path),
            TranspileFailure::Backend(err) => err,
        }
    }
}

/// 转译后端
pub trait Transpiler {
    /// 按配置转译整个模块的源码
    fn transpile(
        &self,
        ctx: &BuildContext,
        source: &str,
    ) -> std::result::Result<String, TranspileFailure>;
}

/// 校验目标版本格式 (`<major>.<minor>`)
pub fn validate_target_version(version: &str) -> Result<()> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d+$").unwrap());
    if pattern.is_match(version) {
        Ok(())
    } else {
        Err(DowngradeError::InvalidArgument(format!(
            "target version '{}' must look like <major>.<minor>, e.g. 3.5",
            version
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_context() {
        let ctx = BuildContext::new(
            &["NoStarImports", "NoAsyncAwait"],
            &["NamedExprFixer"],
            "3.5",
            Path::new("src/pkg/sub/mod.py"),
            &[" typing".to_string(), "pathlib2 ".to_string()],
        );
        assert_eq!(ctx.checkers, "NoStarImports,NoAsyncAwait");
        assert_eq!(ctx.fixers, "NamedExprFixer");
        assert_eq!(ctx.filepath, "mod.py");
        assert_eq!(ctx.install_requires.as_deref(), Some("typing pathlib2"));
    }

    #[test]
    fn test_build_context_without_requirements() {
        let ctx = BuildContext::new(&[], &[], "3.6", Path::new("a.py"), &[]);
        assert_eq!(ctx.install_requires, None);
        let ctx = BuildContext::new(&[], &[], "3.6", Path::new("a.py"), &["  ".to_string()]);
        assert_eq!(ctx.install_requires, None);
    }

    #[test]
    fn test_annotate_with_line() {
        let err = CheckError {
            message: "Prohibited keyword 'async'".to_string(),
            lineno: Some(12),
        }
        .annotate(&PathBuf::from("src/pkg/a.py"));
        assert_eq!(err.to_string(), "src/pkg/a.py@12 - Prohibited keyword 'async'");
    }

    #[test]
    fn test_annotate_without_line() {
        let err = CheckError {
            message: "bad".to_string(),
            lineno: None,
        }
        .annotate(&PathBuf::from("src/pkg/a.py"));
        assert_eq!(err.to_string(), "src/pkg/a.py - bad");
    }

    #[test]
    fn test_validate_target_version() {
        assert!(validate_target_version("3.5").is_ok());
        assert!(validate_target_version("2.7").is_ok());
        assert!(validate_target_version("3.10").is_ok());
        assert!(validate_target_version("3").is_err());
        assert!(validate_target_version("py35").is_err());
        assert!(validate_target_version("3.5.1").is_err());
    }

    #[test]
    fn test_validate_target_version_repeated_calls() {
        for _ in 0..3 {
            assert!(validate_target_version("3.7").is_ok());
            assert!(validate_target_version("3.x").is_err());
        }
    }
}
