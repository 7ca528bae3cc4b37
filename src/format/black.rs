//! # black 后端
//!
//! 以 `black --quiet --config <空配置> --skip-string-normalization [--target-version pyXY] -`
//! 形式调用，源码经 stdin 传入，结果从 stdout 读取。
//! 显式传入空配置，当前目录 `pyproject.toml` 中的 `[tool.black]` 不生效，
//! 输出只由目标版本决定。
//!
//! ## 依赖关系
//! - 实现 `format::Formatter`

use super::{FormatTarget, Formatter};
use crate::error::{DowngradeError, Result};

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// black 子进程格式化器
#[derive(Debug, Clone)]
pub struct Black {
    executable: String,
}

impl Black {
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// 命令行参数
    fn args(target: Option<FormatTarget>, config: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--quiet".into(),
            "--config".into(),
            config.as_os_str().to_os_string(),
            "--skip-string-normalization".into(),
        ];
        if let Some(target) = target {
            args.push("--target-version".into());
            args.push(target.as_str().into());
        }
        args.push("-".into());
        args
    }
}

/// 空的 black 配置文件
#[cfg(unix)]
fn empty_config() -> Result<PathBuf> {
    Ok(PathBuf::from("/dev/null"))
}

/// 空的 black 配置文件
#[cfg(not(unix))]
fn empty_config() -> Result<PathBuf> {
    let path = std::env::temp_dir().join("downgrade-source-black.toml");
    std::fs::write(&path, "").map_err(|e| DowngradeError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path)
}

impl Formatter for Black {
    fn format(&self, text: &str, target: Option<FormatTarget>) -> Result<String> {
        let config = empty_config()?;
        let mut child = Command::new(&self.executable)
            .args(Self::args(target, &config))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| DowngradeError::CommandNotFound {
                command: self.executable.clone(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| DowngradeError::CommandFailed {
                    command: self.executable.clone(),
                    stderr: e.to_string(),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| DowngradeError::CommandFailed {
                command: self.executable.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DowngradeError::CommandFailed {
                command: self.executable.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| DowngradeError::CommandFailed {
            command: self.executable.clone(),
            stderr: e.to_string(),
        })
    }
}
