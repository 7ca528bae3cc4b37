//! # 格式化模块
//!
//! 对外部格式化工具 (black) 的抽象。格式化是尽力而为的：
//! 任何失败都退回未格式化的文本，不会中断批处理。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/downgrade.rs` 使用
//! - 子模块: black

pub mod black;

pub use black::Black;

use crate::error::Result;

/// 当前 black 接受的目标版本（py27 已被 black 22 移除）
const KNOWN_TARGETS: &[&str] = &[
    "py33", "py34", "py35", "py36", "py37", "py38", "py39", "py310", "py311", "py312", "py313",
];

/// 格式化目标版本（如 `py35`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTarget(&'static str);

impl FormatTarget {
    /// 由 `3.5` 形式的版本号推导；格式化工具不认识的版本返回 `None`
    pub fn from_version(version: &str) -> Option<Self> {
        let wanted = format!("py{}", version.replace('.', ""));
        KNOWN_TARGETS
            .iter()
            .copied()
            .find(|t| *t == wanted)
            .map(FormatTarget)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// 格式化后端
pub trait Formatter {
    fn format(&self, text: &str, target: Option<FormatTarget>) -> Result<String>;
}

/// 尽力格式化：失败时返回原文
pub fn format_code(formatter: &dyn Formatter, text: &str, target: Option<FormatTarget>) -> String {
    match formatter.format(text, target) {
        Ok(formatted) => formatted,
        Err(e) => {
            log::debug!("formatter failed, keeping unformatted text: {}", e);
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DowngradeError;

    struct Upper;

    impl Formatter for Upper {
        fn format(&self, text: &str, _target: Option<FormatTarget>) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct Broken;

    impl Formatter for Broken {
        fn format(&self, _text: &str, _target: Option<FormatTarget>) -> Result<String> {
            Err(DowngradeError::CommandFailed {
                command: "black".to_string(),
                stderr: "error: cannot format -: Cannot parse".to_string(),
            })
        }
    }

    #[test]
    fn test_target_from_version() {
        assert_eq!(FormatTarget::from_version("3.5").map(|t| t.as_str()), Some("py35"));
        assert_eq!(FormatTarget::from_version("3.10").map(|t| t.as_str()), Some("py310"));
        assert_eq!(FormatTarget::from_version("2.7"), None);
        assert_eq!(FormatTarget::from_version("3.2"), None);
        assert_eq!(FormatTarget::from_version("4.0"), None);
    }

    #[test]
    fn test_format_code_success() {
        assert_eq!(format_code(&Upper, "x = 1\n", None), "X = 1\n");
    }

    #[test]
    fn test_format_code_failure_keeps_text() {
        let text = "def f(:\n";
        assert_eq!(format_code(&Broken, text, FormatTarget::from_version("3.5")), text);
    }
}
