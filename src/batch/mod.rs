//! # 批量处理模块
//!
//! 把输入文件批量降级到输出子目录。
//!
//! ## 功能
//! - 展开目录输入，收集文件列表
//! - 规划每个文件的输出路径
//! - 顺序执行，检查失败即中止
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/downgrade.rs` 使用
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod job;
pub mod runner;

pub use collector::FileCollector;
pub use job::{plan_jobs, DowngradeJob};
pub use runner::{BatchRunner, RunSettings};
