//!
//! # Test Common Utilities
//!
//! This module provides common utilities for writing integration tests for the `filevault_cli`.
//! It creates an isolated ledger per test and pipes REPL sessions into the binary.
//!
//
// // # 测试通用工具
// //
// // 该模块为 `filevault_cli` 的集成测试提供通用工具。
// // 每个测试都有独立的账本，并通过管道将 REPL 会话送入二进制程序。
// //

#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Builds a deterministic test address such as `0x0101…01`.
//
// // 由一个字节生成确定的测试地址。
pub fn addr(n: u8) -> String {
    format!("0x{}", format!("{:02x}", n).repeat(20))
}

/// The contract owner every test ledger is created with.
pub fn admin() -> String {
    addr(0xad)
}

/// Represents the context for a single test, including a temporary directory.
///
/// The temporary directory is automatically cleaned up
/// when the `TestContext` goes out of scope.
pub struct TestContext {
    /// A handle to the temporary directory. Held for its Drop behavior to ensure cleanup.
    pub _temp_dir: TempDir,
    /// The path to the ledger created within the temporary directory.
    pub ledger_path: PathBuf,
}

impl TestContext {
    /// Creates a new ledger owned by [`admin()`] for testing purposes.
    pub fn new(ledger_name: &str) -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let ledger_path = temp_dir.path().join(ledger_name);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_filevault"));
        cmd.arg("create").arg(temp_dir.path()).arg("--owner").arg(admin());

        // 名称 + 立即退出 REPL
        let input = format!("{}\nexit\n", ledger_name);
        cmd.write_stdin(input).assert().success();

        Ok(TestContext {
            _temp_dir: temp_dir,
            ledger_path,
        })
    }

    /// Opens the ledger and pipes `lines` into the REPL, followed by `exit`.
    pub fn session(&self, lines: &[&str]) -> Assert {
        let mut input = lines.join("\n");
        input.push_str("\nexit\n");

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_filevault"));
        cmd.arg("open").arg(&self.ledger_path);
        cmd.write_stdin(input).assert()
    }

    /// Returns the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self._temp_dir.path()
    }
}
