//! # lib3to6 后端
//!
//! 通过子进程调用 Python 解释器中的 lib3to6。
//!
//! ## 协议
//! - argv: `python -c <BRIDGE> <BuildContext JSON>`
//! - stdin: 源码 (UTF-8)
//! - stdout: `{"source": "..."}` 或 `{"check_error": {"message": "...", "lineno": 12}}`
//!
//! ## 依赖关系
//! - 实现 `transpile::Transpiler`
//! - 使用 `serde_json` 编解码

use super::{BuildContext, CheckError, TranspileFailure, Transpiler};
use crate::error::DowngradeError;

use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};

/// 运行在 Python 侧的桥接脚本
const BRIDGE: &str = r#"
import json
import sys

from lib3to6 import common
from lib3to6 import transpile

cfg = json.loads(sys.argv[1])
ctx = common.init_build_context(
    checkers=cfg["checkers"],
    fixers=cfg["fixers"],
    target_version=cfg["target_version"],
    filepath=cfg["filepath"],
    install_requires=cfg["install_requires"],
)
source = sys.stdin.buffer.read().decode("utf-8")
try:
    reply = {"source": transpile.transpile_module(ctx, source)}
except common.CheckError as err:
    lineno = getattr(err, "lineno", -1)
    reply = {
        "check_error": {
            "message": str(err.args[0]) if err.args else "",
            "lineno": lineno if lineno is not None and lineno >= 0 else None,
        }
    }
sys.stdout.buffer.write(json.dumps(reply).encode("utf-8"))
"#;

/// 桥接脚本的应答
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BridgeReply {
    Source(String),
    CheckError {
        message: String,
        lineno: Option<u32>,
    },
}

/// lib3to6 子进程转译器
#[derive(Debug, Clone)]
pub struct Lib3to6 {
    /// Python 解释器
    python: String,
}

impl Lib3to6 {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }

    /// 调用桥接脚本，返回原始 stdout
    fn run_bridge(&self, ctx: &BuildContext, source: &str) -> Result<Vec<u8>, DowngradeError> {
        let config = serde_json::to_string(ctx).map_err(|e| DowngradeError::BridgeProtocol {
            command: self.python.clone(),
            reason: e.to_string(),
        })?;

        log::debug!("{} -c <lib3to6 bridge> for {}", self.python, ctx.filepath);

        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(BRIDGE)
            .arg(&config)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|_| DowngradeError::CommandNotFound {
                command: self.python.clone(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| DowngradeError::CommandFailed {
                    command: self.python.clone(),
                    stderr: e.to_string(),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| DowngradeError::CommandFailed {
                command: self.python.clone(),
                stderr: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(DowngradeError::CommandFailed {
                command: format!("{} -c <lib3to6 bridge>", self.python),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

impl Transpiler for Lib3to6 {
    fn transpile(&self, ctx: &BuildContext, source: &str) -> Result<String, TranspileFailure> {
        let stdout = self.run_bridge(ctx, source)?;
        parse_reply(&self.python, &stdout)
    }
}

/// 解析桥接脚本输出
fn parse_reply(command: &str, stdout: &[u8]) -> Result<String, TranspileFailure> {
    let reply: BridgeReply =
        serde_json::from_slice(stdout).map_err(|e| DowngradeError::BridgeProtocol {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    match reply {
        BridgeReply::Source(text) => Ok(text),
        BridgeReply::CheckError { message, lineno } => {
            Err(TranspileFailure::Check(CheckError { message, lineno }))
        }
    }
}
