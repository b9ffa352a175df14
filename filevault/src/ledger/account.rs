use log::info;
use rusqlite::{OptionalExtension, params};
use crate::common::address::Address;
use crate::ledger::common::{
    delete_member_row, ensure_account, folder_files_in, owned_folder_ids_of, personal_files_of,
    touch_ledger_update_time,
};
use crate::ledger::records::{AccountDeletion, FolderId};
use crate::ledger::Ledger;

/// Defines errors that can occur while managing an account's registration.
//
// // 定义在管理账户注册信息期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The public key to register is empty.
    //
    // // 要注册的公钥为空。
    #[error("Encryption public key must not be empty")]
    EmptyPublicKey,

    /// The address already has a registered public key.
    //
    // // 该地址已注册过公钥。
    #[error("Address {0} has already registered an encryption key")]
    AlreadyRegistered(Address),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Reads the registered encryption public key of `address`, if any.
pub(crate) fn load_encryption_key(conn: &rusqlite::Connection, address: &Address) -> rusqlite::Result<Option<String>> {
    let key: Option<Option<String>> = conn
        .query_row(
            "SELECT encryption_key FROM accounts WHERE address = ?1",
            params![address],
            |row| row.get(0),
        )
        .optional()?;
    Ok(key.flatten())
}

/// Stores the wallet encryption public key others use to wrap folder keys for `caller`.
pub(crate) fn register_encryption_key(
    ledger: &mut Ledger,
    caller: &Address,
    public_key: &str,
) -> Result<(), AccountError> {
    let public_key = public_key.trim();
    if public_key.is_empty() {
        return Err(AccountError::EmptyPublicKey);
    }

    let tx = ledger.database_connection.transaction()?;
    if load_encryption_key(&tx, caller)?.is_some() {
        return Err(AccountError::AlreadyRegistered(*caller));
    }

    ensure_account(&tx, caller)?;
    tx.execute(
        "UPDATE accounts SET encryption_key = ?1 WHERE address = ?2",
        params![public_key, caller],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    info!("{} registered an encryption key", caller);
    Ok(())
}

/// Erases everything the ledger holds for `caller` in one transaction.
///
/// 1. Deletes all personal files.
/// 2. Deletes every folder the caller owns, with its files.
/// 3. Removes the caller from folders owned by others.
/// 4. Clears the registered encryption key.
///
/// The personal file counter survives, so ids are not handed out twice.
pub(crate) fn delete_account(ledger: &mut Ledger, caller: &Address) -> Result<AccountDeletion, AccountError> {
    let tx = ledger.database_connection.transaction()?;
    let mut deletion = AccountDeletion::default();

    // 1. 个人文件
    deletion.personal_files = personal_files_of(&tx, caller)?;
    tx.execute("DELETE FROM personal_files WHERE owner = ?1", params![caller])?;

    // 2. 自己拥有的文件夹 (级联删除成员和文件)
    for folder_id in owned_folder_ids_of(&tx, caller)? {
        deletion.folder_files.extend(folder_files_in(&tx, folder_id)?);
        tx.execute("DELETE FROM folders WHERE id = ?1", params![folder_id])?;
        deletion.deleted_folders.push(folder_id);
    }

    // 3. 其他人的文件夹中的成员身份
    let memberships: Vec<FolderId> = {
        let mut stmt = tx.prepare(
            "SELECT folder_id FROM folder_members WHERE address = ?1 ORDER BY folder_id",
        )?;
        let rows = stmt.query_map(params![caller], |row| row.get(0))?;
        rows.collect::<Result<Vec<FolderId>, _>>()?
    };
    for folder_id in memberships {
        delete_member_row(&tx, folder_id, caller)?;
        deletion.left_folders.push(folder_id);
    }

    // 4. 注册信息
    tx.execute(
        "UPDATE accounts SET encryption_key = NULL WHERE address = ?1",
        params![caller],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    info!(
        "Deleted account {}: {} personal file(s), {} folder(s) deleted, {} folder(s) left",
        caller,
        deletion.personal_files.len(),
        deletion.deleted_folders.len(),
        deletion.left_folders.len()
    );
    Ok(deletion)
}
