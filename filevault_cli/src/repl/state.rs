use std::sync::{Arc, Mutex, MutexGuard};
use filevault::common::address::Address;
use filevault::ledger::Ledger;
use crate::errors::CliError;

pub struct AppState {
    pub active_ledger: Option<Arc<Mutex<Ledger>>>,
    /// 当前身份：所有操作都以该地址作为调用者。
    pub identity: Address,
}

/// 锁定账本；锁被毒化时返回错误而不是 panic。
pub fn lock_ledger(ledger: &Arc<Mutex<Ledger>>) -> Result<MutexGuard<'_, Ledger>, CliError> {
    ledger.lock().map_err(|_| CliError::LockPoisoned)
}
