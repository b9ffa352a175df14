use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// 代表 `ledger.json` 配置文件的顶层结构。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// 账本的名称
    pub name: String,
    /// 配置格式版本号
    pub version: u32,
    /// 数据库文件的路径 (例如 "ledger.db")，相对于账本根目录
    pub database: PathBuf,
}
