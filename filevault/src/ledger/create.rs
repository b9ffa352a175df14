use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use rusqlite::{Connection, params};
use crate::common::address::Address;
use crate::common::constants::{
    CONFIG_FILE_NAME, CURRENT_LEDGER_VERSION, DATABASE_FILE_NAME, META_CONTRACT_OWNER,
    META_LEDGER_CREATE_TIME, META_LEDGER_UPDATE_TIME,
};
use crate::ledger::common::SEQ_FOLDERS;
use crate::ledger::config::LedgerConfig;
use crate::ledger::Ledger;
use crate::utils::time::now_as_rfc3339_string;

/// Defines errors that can occur during ledger creation.
//
// // 定义在账本创建期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The target directory already exists and is not empty.
    //
    // // 目标目录已存在且不为空。
    #[error("Ledger directory already exists at {0}")]
    LedgerAlreadyExists(PathBuf),

    /// An I/O error occurred while creating directories or writing files.
    //
    // // 在创建目录或写入文件时发生 I/O 错误。
    #[error("Failed to create ledger directory: {0}")]
    DirectoryCreationError(#[from] std::io::Error),

    /// Failed to serialize the `ledger.json` configuration file.
    //
    // // 序列化 `ledger.json` 配置文件失败。
    #[error("Failed to serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// An error occurred while initializing the SQLite database.
    //
    // // 初始化 SQLite 数据库时发生错误。
    #[error("Failed to init database: {0}")]
    DatabaseInitError(#[from] rusqlite::Error),
}

/// 在一个空目录中创建新的账本 (配置文件 + 数据库)。
pub(crate) fn create_ledger(
    ledger_path: &Path,
    ledger_name: &str,
    contract_owner: &Address,
) -> Result<Ledger, CreateError> {
    if ledger_path.exists() && fs::read_dir(ledger_path)?.next().is_some() {
        return Err(CreateError::LedgerAlreadyExists(ledger_path.to_path_buf()));
    }
    fs::create_dir_all(ledger_path)?;

    let config = LedgerConfig {
        name: ledger_name.to_string(),
        version: CURRENT_LEDGER_VERSION,
        database: PathBuf::from(DATABASE_FILE_NAME),
    };
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(ledger_path.join(CONFIG_FILE_NAME), config_json)?;

    let conn = Connection::open(ledger_path.join(&config.database))?;
    let mut ledger = with_connection(conn, config, contract_owner)?;
    ledger.root_path = Some(ledger_path.to_path_buf());

    info!("Created ledger '{}' at {:?}", ledger_name, ledger_path);
    Ok(ledger)
}

/// Wraps an already opened connection, initializing the schema if it is missing.
///
/// The contract owner is only recorded when the database is new; an existing
/// owner is left untouched.
pub(crate) fn with_connection(
    conn: Connection,
    config: LedgerConfig,
    contract_owner: &Address,
) -> Result<Ledger, CreateError> {
    init_schema(&conn)?;

    let now = now_as_rfc3339_string();
    conn.execute(
        "INSERT OR IGNORE INTO ledger_metadata (meta_key, meta_value) VALUES (?1, ?2), (?3, ?4), (?5, ?6)",
        params![
            META_CONTRACT_OWNER,
            contract_owner.to_hex(),
            META_LEDGER_CREATE_TIME,
            &now,
            META_LEDGER_UPDATE_TIME,
            &now
        ],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO sequences (name, next_value) VALUES (?1, 0)",
        params![SEQ_FOLDERS],
    )?;

    Ok(Ledger {
        root_path: None,
        config,
        database_connection: conn,
    })
}

/// Creates every table the ledger needs. Safe to run on an initialized database.
pub(crate) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

         CREATE TABLE IF NOT EXISTS ledger_metadata (
            meta_key            TEXT PRIMARY KEY NOT NULL,
            meta_value          TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS sequences (
            name                TEXT PRIMARY KEY NOT NULL,
            next_value          INTEGER NOT NULL
         );

         CREATE TABLE IF NOT EXISTS accounts (
            address                 CHAR(42) PRIMARY KEY NOT NULL,
            encryption_key          TEXT,
            next_personal_file_id   INTEGER NOT NULL DEFAULT 0
         );

         CREATE TABLE IF NOT EXISTS folders (
            id                  INTEGER PRIMARY KEY NOT NULL,
            name                TEXT NOT NULL,
            owner               CHAR(42) NOT NULL,
            next_file_id        INTEGER NOT NULL DEFAULT 0,
            created_at          TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_folders_owner ON folders(owner);

         CREATE TABLE IF NOT EXISTS folder_members (
            folder_id           INTEGER NOT NULL,
            position            INTEGER NOT NULL,
            address             CHAR(42) NOT NULL,
            wrapped_key         BLOB NOT NULL,
            permissions         INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (folder_id, address),
            FOREIGN KEY (folder_id) REFERENCES folders(id) ON DELETE CASCADE
         );
         CREATE INDEX IF NOT EXISTS idx_members_address ON folder_members(address);

         CREATE TABLE IF NOT EXISTS folder_files (
            folder_id           INTEGER NOT NULL,
            file_id             INTEGER NOT NULL,
            name                TEXT NOT NULL,
            cid                 TEXT NOT NULL,
            uploader            CHAR(42) NOT NULL,
            created_at          TEXT NOT NULL,
            PRIMARY KEY (folder_id, file_id),
            FOREIGN KEY (folder_id) REFERENCES folders(id) ON DELETE CASCADE
         );

         CREATE TABLE IF NOT EXISTS personal_files (
            owner               CHAR(42) NOT NULL,
            file_id             INTEGER NOT NULL,
            name                TEXT NOT NULL,
            cid                 TEXT NOT NULL,
            created_at          TEXT NOT NULL,
            PRIMARY KEY (owner, file_id)
         );",
    )
}
