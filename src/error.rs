//! # 统一错误处理模块
//!
//! 定义 downgrade-source 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 退出码
//! - `2` - 用法/参数校验错误（未处理任何文件，包括输入不存在）
//! - `3` - 运行期错误（检查失败、I/O、外部命令）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 用法错误退出码（与 clap 一致）
pub const EXIT_USAGE: i32 = 2;

/// 运行失败退出码
pub const EXIT_FAILURE: i32 = 3;

/// downgrade-source 统一错误类型
#[derive(Error, Debug)]
pub enum DowngradeError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    CreateDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 路径解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("{path} is not inside the package path {pkg_path}")]
    OutsidePackage { path: String, pkg_path: String },

    // ─────────────────────────────────────────────────────────────
    // 转译错误
    // ─────────────────────────────────────────────────────────────
    #[error("{location} - {message}")]
    CheckError { location: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Unexpected reply from {command}: {reason}")]
    BridgeProtocol { command: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("{0} is not a valid checker. Pass --list-checkers for the full allowed list")]
    UnknownChecker(String),

    #[error("{0} is not a valid fixer. Pass --list-fixers for the full allowed list")]
    UnknownFixer(String),

    #[error("No files were passed")]
    NoFiles,

    #[error("--pkg-path is required when processing files")]
    MissingPkgPath,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DowngradeError {
    /// 错误对应的进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            DowngradeError::OutsidePackage { .. }
            | DowngradeError::FileNotFound { .. }
            | DowngradeError::UnknownChecker(_)
            | DowngradeError::UnknownFixer(_)
            | DowngradeError::NoFiles
            | DowngradeError::MissingPkgPath
            | DowngradeError::InvalidArgument(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DowngradeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_error_message() {
        let err = DowngradeError::CheckError {
            location: "src/pkg/mod.py@12".to_string(),
            message: "Prohibited keyword 'async'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "src/pkg/mod.py@12 - Prohibited keyword 'async'"
        );
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_validation_errors_are_usage_errors() {
        assert_eq!(
            DowngradeError::UnknownFixer("Nope".into()).exit_code(),
            EXIT_USAGE
        );
        assert_eq!(DowngradeError::NoFiles.exit_code(), EXIT_USAGE);
        assert_eq!(
            DowngradeError::OutsidePackage {
                path: "a.py".into(),
                pkg_path: "src".into()
            }
            .exit_code(),
            EXIT_USAGE
        );
    }
}
