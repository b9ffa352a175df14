use log::info;
use rusqlite::params;
use crate::common::address::Address;
use crate::common::constants::META_CONTRACT_OWNER;
use crate::ledger::common::touch_ledger_update_time;
use crate::ledger::Ledger;

/// Defines errors that can occur during ledger-level administrative operations.
//
// // 定义在账本级管理操作期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The caller is not the administrative owner of the ledger.
    //
    // // 调用者不是账本的管理员 (合约所有者)。
    #[error("Only the contract owner may do this (caller {0})")]
    NotContractOwner(Address),

    /// An error occurred while reading or writing ledger metadata.
    //
    // // 读写账本元数据时发生错误。
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Reads the administrative owner from ledger metadata.
pub(crate) fn load_contract_owner(conn: &rusqlite::Connection) -> rusqlite::Result<Address> {
    conn.query_row(
        "SELECT meta_value FROM ledger_metadata WHERE meta_key = ?1",
        params![META_CONTRACT_OWNER],
        |row| row.get(0),
    )
}

/// Hands the administrative role to `new_owner`.
///
/// This is unrelated to folder ownership, which can never be transferred.
pub(crate) fn set_owner(ledger: &mut Ledger, caller: &Address, new_owner: &Address) -> Result<(), AdminError> {
    let tx = ledger.database_connection.transaction()?;

    let current = load_contract_owner(&tx)?;
    if current != *caller {
        return Err(AdminError::NotContractOwner(*caller));
    }

    tx.execute(
        "UPDATE ledger_metadata SET meta_value = ?1 WHERE meta_key = ?2",
        params![new_owner, META_CONTRACT_OWNER],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    info!("Contract owner changed from {} to {}", current, new_owner);
    Ok(())
}
