//! # 插件注册表
//!
//! lib3to6 提供的 checker / fixer 名称，静态声明，不做运行时反射。
//! 名称顺序即传递给 lib3to6 的顺序。
//!
//! ## 依赖关系
//! - 被 `commands/list.rs`, `commands/downgrade.rs` 使用
//! - 无外部模块依赖

use crate::error::{DowngradeError, Result};

/// 插件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Checker,
    Fixer,
}

/// lib3to6 checker 名称
const CHECKERS: &[&str] = &[
    "NoStarImports",
    "NoOverriddenFixerImportsChecker",
    "NoOverriddenBuiltinsChecker",
    "NoOpenWithEncodingChecker",
    "NoAsyncAwait",
    "NoComplexNamedTuple",
    "NoUnusableImports",
    "NoYieldFromChecker",
    "NoMatMultOpChecker",
];

/// lib3to6 fixer 名称
const FIXERS: &[&str] = &[
    "AbsoluteImportFutureFixer",
    "DivisionFutureFixer",
    "PrintFunctionFutureFixer",
    "UnicodeLiteralsFutureFixer",
    "RemoveUnsupportedFuturesFixer",
    "GeneratorReturnToStopIterationExceptionFixer",
    "XrangeToRangeFixer",
    "UnicodeToStrFixer",
    "UnichrToChrFixer",
    "RawInputToInputFixer",
    "ConfigParserImportFallbackFixer",
    "SocketServerImportFallbackFixer",
    "BuiltinsImportFallbackFixer",
    "QueueImportFallbackFixer",
    "CopyRegImportFallbackFixer",
    "WinRegImportFallbackFixer",
    "ReprLibImportFallbackFixer",
    "DummyThreadImportFallbackFixer",
    "ThreadImportFallbackFixer",
    "RemoveFunctionDefAnnotationsFixer",
    "RemoveAnnAssignFixer",
    "ShortToLongFormSuperFixer",
    "InlineKWOnlyArgsFixer",
    "NewStyleClassesFixer",
    "ItertoolsBuiltinsFixer",
    "NamedTupleClassToAssignFixer",
    "UnpackingGeneralizationsFixer",
    "NamedExprFixer",
    "FStringToStrFormatFixer",
];

/// checker / fixer 名称表
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    checkers: &'static [&'static str],
    fixers: &'static [&'static str],
}

impl PluginRegistry {
    /// lib3to6 的插件表
    pub fn lib3to6() -> Self {
        Self {
            checkers: CHECKERS,
            fixers: FIXERS,
        }
    }

    /// 某类别下的全部名称
    pub fn names(&self, kind: PluginKind) -> &'static [&'static str] {
        match kind {
            PluginKind::Checker => self.checkers,
            PluginKind::Fixer => self.fixers,
        }
    }

    pub fn contains(&self, kind: PluginKind, name: &str) -> bool {
        self.names(kind).contains(&name)
    }

    /// 校验跳过列表，返回剩余启用的名称（保持注册顺序）
    pub fn enabled(&self, kind: PluginKind, skipped: &[String]) -> Result<Vec<&'static str>> {
        if let Some(unknown) = skipped.iter().find(|name| !self.contains(kind, name)) {
            return Err(match kind {
                PluginKind::Checker => DowngradeError::UnknownChecker(unknown.clone()),
                PluginKind::Fixer => DowngradeError::UnknownFixer(unknown.clone()),
            });
        }

        Ok(self
            .names(kind)
            .iter()
            .copied()
            .filter(|name| !skipped.iter().any(|s| s == name))
            .collect())
    }

    /// `--list-*` 输出
    pub fn listing(&self, kind: PluginKind) -> String {
        let title = match kind {
            PluginKind::Checker => "Checkers List:",
            PluginKind::Fixer => "Fixers List:",
        };
        let items = self
            .names(kind)
            .iter()
            .map(|name| format!("  - {}", name))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}\n", title, items)
    }
}
