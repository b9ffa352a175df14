use std::path::PathBuf;
use chrono::{DateTime, Utc};
use filevault::common::address::Address;
use filevault::common::constants::{META_LEDGER_CREATE_TIME, META_LEDGER_UPDATE_TIME};
use filevault::ledger::Ledger;
use filevault::utils::time::parse_rfc3339_string;
use crate::errors::CliError;

/// A snapshot of ledger-level information, collected for `status`.
pub struct LedgerStatus {
    pub name: String,
    pub path: Option<PathBuf>,
    pub version: u32,
    pub contract_owner: Address,
    pub identity: Address,
    pub folder_count: usize,
    pub owned_folder_count: usize,
    pub personal_file_count: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn handle_status(ledger: &Ledger, identity: &Address) -> Result<LedgerStatus, CliError> {
    // 时间戳缺失或格式错误时显示为 N/A
    let read_time = |key: &str| -> Option<DateTime<Utc>> {
        ledger
            .ledger_metadata(key)
            .ok()
            .and_then(|value| parse_rfc3339_string(&value).ok())
    };

    Ok(LedgerStatus {
        name: ledger.config.name.clone(),
        path: ledger.root_path.clone(),
        version: ledger.config.version,
        contract_owner: ledger.contract_owner()?,
        identity: *identity,
        folder_count: ledger.folder_count()?,
        owned_folder_count: ledger.owned_folder_ids(identity)?.len(),
        personal_file_count: ledger.personal_file_ids(identity)?.len(),
        created_at: read_time(META_LEDGER_CREATE_TIME),
        updated_at: read_time(META_LEDGER_UPDATE_TIME),
    })
}
