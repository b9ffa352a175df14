use std::collections::HashSet;
use log::{debug, info};
use rusqlite::params;
use crate::common::address::Address;
use crate::common::constants::MAX_FOLDER_MEMBERS;
use crate::common::key::WrappedKey;
use crate::common::permissions::Permissions;
use crate::ledger::common::{
    Access, SEQ_FOLDERS, delete_member_row, folder_files_in, load_folder, member_addresses,
    next_sequence, touch_ledger_update_time,
};
use crate::ledger::records::{FolderFileEntry, FolderId};
use crate::ledger::Ledger;
use crate::utils::time::now_as_rfc3339_string;

/// Defines errors that can occur during folder lifecycle operations.
//
// // 定义在文件夹生命周期操作期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    /// The member list and the key list passed to `create_folder` differ in length.
    //
    // // 传给 `create_folder` 的成员列表与密钥列表长度不一致。
    #[error("Got {members} member(s) but {keys} key(s)")]
    MembersKeysMismatch { members: usize, keys: usize },

    /// The folder would have more members than allowed.
    //
    // // 文件夹成员数量将超过上限。
    #[error("A folder may have at most {0} members")]
    MemberLimitReached(usize),

    /// An address appears more than once in the initial member list.
    //
    // // 初始成员列表中出现了重复地址。
    #[error("Address {0} is already a member")]
    AlreadyMember(Address),

    /// The caller is not in the folder's member list.
    //
    // // 调用者不在文件夹的成员列表中。
    #[error("Address {0} is not a member of this folder")]
    NotAMember(Address),

    /// The folder owner tried to leave their own folder.
    //
    // // 文件夹所有者试图离开自己的文件夹。
    #[error("The folder owner cannot leave; delete the folder instead")]
    OwnerCannotLeave,

    /// Someone other than the folder owner tried to delete it.
    //
    // // 非所有者试图删除文件夹。
    #[error("Only the folder owner may delete folder {0}")]
    OnlyFolderOwner(FolderId),

    /// The number of new keys does not match the current member count.
    //
    // // 新密钥的数量与当前成员数量不一致。
    #[error("Expected {expected} key(s), one per member, but got {got}")]
    KeysCountMismatch { expected: usize, got: usize },

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

/// Creates a folder owned by `caller`.
///
/// `members[i]` receives `keys[i]`. Nobody needs permission to create a
/// folder, and every listed member starts without any flags.
pub(crate) fn create_folder(
    ledger: &mut Ledger,
    caller: &Address,
    name: &str,
    members: &[Address],
    keys: &[WrappedKey],
) -> Result<FolderId, FolderError> {
    if members.len() != keys.len() {
        return Err(FolderError::MembersKeysMismatch {
            members: members.len(),
            keys: keys.len(),
        });
    }
    if members.len() > MAX_FOLDER_MEMBERS {
        return Err(FolderError::MemberLimitReached(MAX_FOLDER_MEMBERS));
    }
    let mut seen = HashSet::with_capacity(members.len());
    if let Some(duplicate) = members.iter().find(|m| !seen.insert(**m)) {
        return Err(FolderError::AlreadyMember(*duplicate));
    }

    let tx = ledger.database_connection.transaction()?;
    let folder_id = next_sequence(&tx, SEQ_FOLDERS)?;
    tx.execute(
        "INSERT INTO folders (id, name, owner, next_file_id, created_at) VALUES (?1, ?2, ?3, 0, ?4)",
        params![folder_id, name, caller, now_as_rfc3339_string()],
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO folder_members (folder_id, position, address, wrapped_key, permissions)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (position, (member, key)) in members.iter().zip(keys).enumerate() {
            stmt.execute(params![folder_id, position as i64, member, key, Permissions::empty()])?;
        }
    }
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    info!("{} created folder {} ('{}') with {} member(s)", caller, folder_id, name, members.len());
    Ok(folder_id)
}

/// Deletes a folder together with its memberships and files.
///
/// Returns the removed file records. Releasing the content behind their CIDs
/// is up to the caller and should only happen after this call succeeded.
pub(crate) fn delete_folder(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
) -> Result<Vec<FolderFileEntry>, FolderError> {
    let tx = ledger.database_connection.transaction()?;
    let folder = load_folder(&tx, folder_id)?.ok_or(FolderError::FolderNotFound(folder_id))?;
    if folder.owner != *caller {
        return Err(FolderError::OnlyFolderOwner(folder_id));
    }

    let removed_files = folder_files_in(&tx, folder_id)?;
    // 成员与文件通过外键级联删除
    tx.execute("DELETE FROM folders WHERE id = ?1", params![folder_id])?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    info!("{} deleted folder {} and {} file(s)", caller, folder_id, removed_files.len());
    Ok(removed_files)
}

/// Removes the caller from a folder they belong to.
///
/// Unlike `remove_member`, leaving is always allowed for managers. Owners can
/// never leave since a folder cannot exist without its owner.
pub(crate) fn leave_folder(ledger: &mut Ledger, caller: &Address, folder_id: FolderId) -> Result<(), FolderError> {
    let tx = ledger.database_connection.transaction()?;
    let folder = load_folder(&tx, folder_id)?.ok_or(FolderError::FolderNotFound(folder_id))?;
    if folder.owner == *caller {
        return Err(FolderError::OwnerCannotLeave);
    }

    let access = Access::resolve(&tx, &folder, caller)?;
    if access.permissions.is_none() {
        return Err(FolderError::NotAMember(*caller));
    }

    delete_member_row(&tx, folder_id, caller)?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} left folder {}", caller, folder_id);
    Ok(())
}

/// Replaces every member's wrapped key, in member order.
///
/// The ledger only checks that there is one key per member; matching keys to
/// members is the caller's job (see `Ledger::folder_members` for the order).
pub(crate) fn rotate_folder_key(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    new_keys: &[WrappedKey],
) -> Result<(), FolderError> {
    let tx = ledger.database_connection.transaction()?;
    let folder = load_folder(&tx, folder_id)?.ok_or(FolderError::FolderNotFound(folder_id))?;

    let access = Access::resolve(&tx, &folder, caller)?;
    if !access.allows(Permissions::MANAGE_PERMISSIONS) {
        return Err(FolderError::PermissionDenied {
            caller: *caller,
            required: Permissions::MANAGE_PERMISSIONS,
        });
    }

    let members = member_addresses(&tx, folder_id)?;
    if members.len() != new_keys.len() {
        return Err(FolderError::KeysCountMismatch {
            expected: members.len(),
            got: new_keys.len(),
        });
    }

    {
        let mut stmt = tx.prepare(
            "UPDATE folder_members SET wrapped_key = ?1 WHERE folder_id = ?2 AND address = ?3",
        )?;
        for (member, key) in members.iter().zip(new_keys) {
            stmt.execute(params![key, folder_id, member])?;
        }
    }
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} rotated the key of folder {} for {} member(s)", caller, folder_id, members.len());
    Ok(())
}
