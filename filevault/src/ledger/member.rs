use log::debug;
use rusqlite::params;
use crate::common::address::Address;
use crate::common::constants::MAX_FOLDER_MEMBERS;
use crate::common::key::WrappedKey;
use crate::common::permissions::Permissions;
use crate::ledger::common::{
    Access, FolderRow, delete_member_row, load_folder, member_count, member_permissions,
    touch_ledger_update_time,
};
use crate::ledger::records::FolderId;
use crate::ledger::Ledger;

/// Defines errors that can occur while managing folder members.
//
// // 定义在管理文件夹成员期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    /// The address to add is already in the member list.
    //
    // // 要添加的地址已在成员列表中。
    #[error("Address {0} is already a member")]
    AlreadyMember(Address),

    /// The target address is not in the member list.
    //
    // // 目标地址不在成员列表中。
    #[error("Address {0} is not a member of this folder")]
    NotAMember(Address),

    /// A manager tried to remove themself; `leave_folder` is the way out.
    //
    // // 管理者试图移除自己；应使用 `leave_folder`。
    #[error("Managers cannot remove themselves; leave the folder instead")]
    CannotRemoveSelf,

    /// A non-owner tried to remove a manager (or the folder owner).
    //
    // // 非所有者试图移除一个管理者 (或文件夹所有者)。
    #[error("Only the folder owner may remove manager {0}")]
    CannotRemoveManager(Address),

    /// A non-owner tried to change another manager's flags.
    //
    // // 非所有者试图修改另一个管理者的权限。
    #[error("Only the folder owner may change the permissions of manager {0}")]
    CannotModifyManager(Address),

    /// The folder already holds the maximum number of members.
    //
    // // 文件夹成员已达上限。
    #[error("A folder may have at most {0} members")]
    MemberLimitReached(usize),

    /// The caller lacks the flag the operation requires.
    //
    // // 调用者缺少该操作所需的权限标志。
    #[error("Caller {caller} lacks the '{required}' permission")]
    PermissionDenied { caller: Address, required: Permissions },

    /// No folder with this id exists.
    //
    // // 不存在该 id 的文件夹。
    #[error("Folder {0} not found")]
    FolderNotFound(FolderId),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// Loads the folder and checks that the caller may manage its members.
fn require_manager(
    conn: &rusqlite::Connection,
    caller: &Address,
    folder_id: FolderId,
) -> Result<(FolderRow, Access), MemberError> {
    let folder = load_folder(conn, folder_id)?.ok_or(MemberError::FolderNotFound(folder_id))?;
    let access = Access::resolve(conn, &folder, caller)?;
    if !access.allows(Permissions::MANAGE_PERMISSIONS) {
        return Err(MemberError::PermissionDenied {
            caller: *caller,
            required: Permissions::MANAGE_PERMISSIONS,
        });
    }
    Ok((folder, access))
}

/// Appends `address` to the member list with no flags.
pub(crate) fn add_member(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    address: &Address,
    key: &WrappedKey,
) -> Result<(), MemberError> {
    let tx = ledger.database_connection.transaction()?;
    require_manager(&tx, caller, folder_id)?;

    if member_permissions(&tx, folder_id, address)?.is_some() {
        return Err(MemberError::AlreadyMember(*address));
    }
    let count = member_count(&tx, folder_id)?;
    if count >= MAX_FOLDER_MEMBERS {
        return Err(MemberError::MemberLimitReached(MAX_FOLDER_MEMBERS));
    }

    tx.execute(
        "INSERT INTO folder_members (folder_id, position, address, wrapped_key, permissions)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![folder_id, count as i64, address, key, Permissions::empty()],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} added {} to folder {}", caller, address, folder_id);
    Ok(())
}

/// Removes another member from a folder.
///
/// Managers may remove plain members only. Removing a manager, or removing
/// oneself through this path, needs the folder owner.
pub(crate) fn remove_member(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    address: &Address,
) -> Result<(), MemberError> {
    let tx = ledger.database_connection.transaction()?;
    let (folder, access) = require_manager(&tx, caller, folder_id)?;

    let target = member_permissions(&tx, folder_id, address)?.ok_or(MemberError::NotAMember(*address))?;

    if !access.is_owner {
        if address == caller {
            return Err(MemberError::CannotRemoveSelf);
        }
        if target.is_manager() || *address == folder.owner {
            return Err(MemberError::CannotRemoveManager(*address));
        }
    }

    delete_member_row(&tx, folder_id, address)?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} removed {} from folder {}", caller, address, folder_id);
    Ok(())
}

/// Overwrites a member's flags with `permissions`. Nothing is merged.
pub(crate) fn set_member_permissions(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    address: &Address,
    permissions: Permissions,
) -> Result<(), MemberError> {
    let tx = ledger.database_connection.transaction()?;
    let (folder, access) = require_manager(&tx, caller, folder_id)?;

    let current = member_permissions(&tx, folder_id, address)?.ok_or(MemberError::NotAMember(*address))?;

    if !access.is_owner && address != caller && (current.is_manager() || *address == folder.owner) {
        return Err(MemberError::CannotModifyManager(*address));
    }

    tx.execute(
        "UPDATE folder_members SET permissions = ?1 WHERE folder_id = ?2 AND address = ?3",
        params![permissions, folder_id, address],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} set permissions of {} in folder {} to {}", caller, address, folder_id, permissions);
    Ok(())
}
