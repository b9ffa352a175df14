use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use rusqlite::Connection;
use serde_json::Value;
use crate::common::constants::{CONFIG_FILE_NAME, CURRENT_LEDGER_VERSION};
use crate::ledger::config::LedgerConfig;
use crate::ledger::create::init_schema;
use crate::ledger::Ledger;

/// Defines errors that can occur when opening an existing ledger.
//
// // 定义在打开一个已存在的账本时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The specified path does not exist or is not a directory.
    //
    // // 指定的路径不存在或不是一个目录。
    #[error("Ledger path does not exist or is not a directory: {0}")]
    PathNotFound(PathBuf),

    /// The `ledger.json` file is missing from the ledger directory.
    //
    // // 账本目录中缺少 `ledger.json` 文件。
    #[error("Configuration file 'ledger.json' not found in ledger.")]
    ConfigNotFound,

    /// The database file specified in the config is missing.
    //
    // // 配置中指定的数据库文件丢失。
    #[error("Database file specified in config not found.")]
    DatabaseNotFound,

    /// An I/O error occurred while reading the configuration file.
    //
    // // 读取配置文件时发生 I/O 错误。
    #[error("Failed to read configuration file: {0}")]
    ConfigReadError(#[from] std::io::Error),

    /// Failed to parse the `ledger.json` configuration file.
    //
    // // 解析 `ledger.json` 配置文件失败。
    #[error("Failed to parse configuration file: {0}")]
    ConfigParseError(#[from] serde_json::Error),

    /// Failed to open or connect to the SQLite database.
    //
    // // 打开或连接到 SQLite 数据库失败。
    #[error("Failed to open database: {0}")]
    DatabaseOpenError(#[from] rusqlite::Error),

    /// The ledger's version in `ledger.json` is not supported by this library version.
    //
    // // `ledger.json` 中的账本版本不受此库版本支持。
    #[error("Unsupported ledger version: found {found}, but this library supports version {supported}.")]
    UnsupportedVersion {
        supported: u32,
        found: u32,
    },
}

/// 打开一个已存在的账本。
pub(crate) fn open_ledger(ledger_path: &Path) -> Result<Ledger, OpenError> {
    if !ledger_path.is_dir() {
        return Err(OpenError::PathNotFound(ledger_path.to_path_buf()));
    }

    let config_path = ledger_path.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Err(OpenError::ConfigNotFound);
    }

    let config_content = fs::read_to_string(config_path)?;

    // --- 版本检查 ---
    let config_value: Value = serde_json::from_str(&config_content)?;
    // 缺失或超出 u32 范围的版本号都按 0 处理
    let version = config_value["version"]
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);
    if version != CURRENT_LEDGER_VERSION {
        return Err(OpenError::UnsupportedVersion {
            supported: CURRENT_LEDGER_VERSION,
            found: version,
        });
    }

    let config: LedgerConfig = serde_json::from_str(&config_content)?;

    let db_path = ledger_path.join(&config.database);
    if !db_path.exists() {
        return Err(OpenError::DatabaseNotFound);
    }
    let conn = Connection::open(db_path)?;
    // foreign_keys 是连接级别的设置，每次打开都必须重新启用
    init_schema(&conn)?;

    info!("Opened ledger '{}' at {:?}", config.name, ledger_path);
    Ok(Ledger {
        root_path: Some(ledger_path.to_path_buf()),
        config,
        database_connection: conn,
    })
}
