use log::debug;
use rusqlite::params;
use crate::common::address::Address;
use crate::common::permissions::Permissions;
use crate::ledger::common::{
    Access, ensure_account, load_folder, load_folder_file, load_personal_file,
    touch_ledger_update_time,
};
use crate::ledger::records::{FileId, FolderFileEntry, FolderId, PersonalFileEntry};
use crate::ledger::Ledger;
use crate::utils::time::now_as_rfc3339_string;

/// Defines errors that can occur while adding or removing file records.
//
// // 定义在添加或删除文件记录期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The file does not exist in the given scope.
    //
    // // 文件在给定范围内不存在。
    #[error("File {0} is not available")]
    FileNotAvailable(FileId),

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

/// Records a file in a folder. Needs `UPLOAD` or folder ownership.
pub(crate) fn upload_file(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    name: &str,
    cid: &str,
) -> Result<FileId, FileError> {
    let tx = ledger.database_connection.transaction()?;
    let folder = load_folder(&tx, folder_id)?.ok_or(FileError::FolderNotFound(folder_id))?;

    let access = Access::resolve(&tx, &folder, caller)?;
    if !access.allows(Permissions::UPLOAD) {
        return Err(FileError::PermissionDenied {
            caller: *caller,
            required: Permissions::UPLOAD,
        });
    }

    let file_id = folder.next_file_id;
    tx.execute(
        "INSERT INTO folder_files (folder_id, file_id, name, cid, uploader, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![folder_id, file_id, name, cid, caller, now_as_rfc3339_string()],
    )?;
    tx.execute(
        "UPDATE folders SET next_file_id = next_file_id + 1 WHERE id = ?1",
        params![folder_id],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} uploaded file {} ('{}') to folder {}", caller, file_id, name, folder_id);
    Ok(file_id)
}

/// Records a file in the caller's personal space.
pub(crate) fn upload_personal_file(
    ledger: &mut Ledger,
    caller: &Address,
    name: &str,
    cid: &str,
) -> Result<FileId, FileError> {
    let tx = ledger.database_connection.transaction()?;
    ensure_account(&tx, caller)?;

    let file_id: FileId = tx.query_row(
        "SELECT next_personal_file_id FROM accounts WHERE address = ?1",
        params![caller],
        |row| row.get(0),
    )?;
    tx.execute(
        "INSERT INTO personal_files (owner, file_id, name, cid, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![caller, file_id, name, cid, now_as_rfc3339_string()],
    )?;
    tx.execute(
        "UPDATE accounts SET next_personal_file_id = next_personal_file_id + 1 WHERE address = ?1",
        params![caller],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} uploaded personal file {} ('{}')", caller, file_id, name);
    Ok(file_id)
}

/// Removes a file record from a folder and returns it.
///
/// Existence is checked before authorization, so a missing file is reported
/// as `FileNotAvailable` to everyone.
pub(crate) fn delete_file(
    ledger: &mut Ledger,
    caller: &Address,
    folder_id: FolderId,
    file_id: FileId,
) -> Result<FolderFileEntry, FileError> {
    let tx = ledger.database_connection.transaction()?;
    let folder = load_folder(&tx, folder_id)?.ok_or(FileError::FolderNotFound(folder_id))?;
    let entry = load_folder_file(&tx, folder_id, file_id)?.ok_or(FileError::FileNotAvailable(file_id))?;

    let access = Access::resolve(&tx, &folder, caller)?;
    if !access.allows(Permissions::DELETE) {
        return Err(FileError::PermissionDenied {
            caller: *caller,
            required: Permissions::DELETE,
        });
    }

    tx.execute(
        "DELETE FROM folder_files WHERE folder_id = ?1 AND file_id = ?2",
        params![folder_id, file_id],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} deleted file {} from folder {}", caller, file_id, folder_id);
    Ok(entry)
}

/// Removes a file record from the caller's personal space and returns it.
pub(crate) fn delete_personal_file(
    ledger: &mut Ledger,
    caller: &Address,
    file_id: FileId,
) -> Result<PersonalFileEntry, FileError> {
    let tx = ledger.database_connection.transaction()?;
    let entry = load_personal_file(&tx, caller, file_id)?.ok_or(FileError::FileNotAvailable(file_id))?;

    tx.execute(
        "DELETE FROM personal_files WHERE owner = ?1 AND file_id = ?2",
        params![caller, file_id],
    )?;
    touch_ledger_update_time(&tx)?;
    tx.commit()?;

    debug!("{} deleted personal file {}", caller, file_id);
    Ok(entry)
}
