//! # 作业规划
//!
//! 为每个输入文件计算相对路径与输出路径：
//! `dest = pkg / <output-tree> / relative(src, pkg)`。
//! 所有作业在读写任何文件前规划完毕，包外文件会让整个批次提前失败。
//!
//! ## 依赖关系
//! - 被 `commands/downgrade.rs`, `batch/runner.rs` 使用

use crate::cli::OutputTree;
use crate::error::{DowngradeError, Result};

use std::path::{Component, Path, PathBuf};

/// 单文件作业
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DowngradeJob {
    /// 输入文件（命令行给出的形式）
    pub source: PathBuf,
    /// 相对包根目录的路径
    pub relative: PathBuf,
    /// 输出文件
    pub dest: PathBuf,
}

impl DowngradeJob {
    /// 规划单个作业
    pub fn plan(source: &Path, pkg_path: &Path, tree: OutputTree) -> Result<Self> {
        let normalized_source = normalize(source);
        let normalized_pkg = normalize(pkg_path);

        let relative = normalized_source
            .strip_prefix(&normalized_pkg)
            .map_err(|_| DowngradeError::OutsidePackage {
                path: source.display().to_string(),
                pkg_path: pkg_path.display().to_string(),
            })?
            .to_path_buf();

        if relative.as_os_str().is_empty() {
            return Err(DowngradeError::OutsidePackage {
                path: source.display().to_string(),
                pkg_path: pkg_path.display().to_string(),
            });
        }

        let dest = pkg_path.join(tree.dir_name()).join(&relative);

        Ok(Self {
            source: source.to_path_buf(),
            relative,
            dest,
        })
    }
}

/// 规划全部作业；任一失败则整体失败
pub fn plan_jobs(
    files: &[PathBuf],
    pkg_path: &Path,
    tree: OutputTree,
) -> Result<Vec<DowngradeJob>> {
    files
        .iter()
        .map(|file| DowngradeJob::plan(file, pkg_path, tree))
        .collect()
}

/// 词法规整路径：去掉 `.`，`..` 抵消前一个普通分量
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dest_mirrors_relative_path() {
        let job = DowngradeJob::plan(
            Path::new("src/pkg/sub/mod.py"),
            Path::new("src/pkg"),
            OutputTree::Downgraded,
        )
        .unwrap();
        assert_eq!(job.relative, PathBuf::from("sub/mod.py"));
        assert_eq!(job.dest, PathBuf::from("src/pkg/downgraded/sub/mod.py"));
        assert_eq!(job.source, PathBuf::from("src/pkg/sub/mod.py"));
    }

    #[test]
    fn test_untyped_tree() {
        let job = DowngradeJob::plan(
            Path::new("src/pkg/mod.py"),
            Path::new("src/pkg"),
            OutputTree::Untyped,
        )
        .unwrap();
        assert_eq!(job.dest, PathBuf::from("src/pkg/untyped/mod.py"));
    }

    #[test]
    fn test_current_dir_prefix_is_ignored() {
        let job = DowngradeJob::plan(
            Path::new("src/pkg/mod.py"),
            Path::new("./src/pkg"),
            OutputTree::Downgraded,
        )
        .unwrap();
        assert_eq!(job.relative, PathBuf::from("mod.py"));
        assert_eq!(job.dest, PathBuf::from("./src/pkg/downgraded/mod.py"));
    }

    #[test]
    fn test_outside_package() {
        let err = DowngradeJob::plan(
            Path::new("other/mod.py"),
            Path::new("src/pkg"),
            OutputTree::Downgraded,
        )
        .unwrap_err();
        assert!(matches!(err, DowngradeError::OutsidePackage { .. }));

        // 兄弟目录前缀相同也不算包内
        let err = DowngradeJob::plan(
            Path::new("src/pkg2/mod.py"),
            Path::new("src/pkg"),
            OutputTree::Downgraded,
        )
        .unwrap_err();
        assert!(matches!(err, DowngradeError::OutsidePackage { .. }));
    }

    #[test]
    fn test_plan_jobs_fails_as_a_whole() {
        let files = vec![PathBuf::from("src/pkg/a.py"), PathBuf::from("elsewhere/b.py")];
        assert!(plan_jobs(&files, Path::new("src/pkg"), OutputTree::Downgraded).is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("./a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
    }
}
