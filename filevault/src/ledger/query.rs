use rusqlite::{Connection, OptionalExtension, params};
use crate::common::address::Address;
use crate::common::key::WrappedKey;
use crate::common::permissions::Permissions;
use crate::ledger::account::load_encryption_key;
use crate::ledger::admin::load_contract_owner;
use crate::ledger::common::{
    FolderRow, folder_files_in, load_folder, load_folder_file, load_personal_file, member_addresses,
    member_permissions, owned_folder_ids_of, personal_files_of,
};
use crate::ledger::records::{
    FileId, FolderFileEntry, FolderId, FolderInfo, FolderSummary, MemberEntry, PersonalFileEntry,
};

/// Defines errors that can occur during a read-only query.
//
// // 定义在只读查询期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// No folder with this id exists.
    //
    // // 不存在该 id 的文件夹。
    #[error("Folder {0} not found")]
    FolderNotFound(FolderId),

    /// The requested file does not exist in the given scope.
    //
    // // 请求的文件在给定范围内不存在。
    #[error("File {0} is not available")]
    FileNotAvailable(FileId),

    /// The address is not a member of the folder (so it has no wrapped key there).
    //
    // // 该地址不是文件夹成员 (因此没有对应的包装密钥)。
    #[error("Address {0} is not a member of this folder")]
    NotAMember(Address),

    /// A ledger-level metadata key is missing.
    //
    // // 缺少账本级元数据键。
    #[error("Ledger metadata key '{0}' not found.")]
    MetadataKeyNotFound(String),

    /// An error occurred while interacting with the database.
    //
    // // 与数据库交互时发生错误。
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

/// 一个文件夹是否为"个人文件夹"：唯一成员就是其所有者。
const IS_PERSONAL_FOLDER: &str = "(SELECT COUNT(*) FROM folder_members m WHERE m.folder_id = f.id) = 1
     AND EXISTS (SELECT 1 FROM folder_members m WHERE m.folder_id = f.id AND m.address = f.owner)";

fn require_folder(conn: &Connection, folder_id: FolderId) -> Result<FolderRow, QueryError> {
    load_folder(conn, folder_id)?.ok_or(QueryError::FolderNotFound(folder_id))
}

pub(crate) fn folder(conn: &Connection, folder_id: FolderId) -> Result<FolderInfo, QueryError> {
    let row = require_folder(conn, folder_id)?;
    let members = member_addresses(conn, folder_id)?;
    Ok(FolderInfo {
        id: row.id,
        name: row.name,
        owner: row.owner,
        members,
        created_at: row.created_at,
    })
}

pub(crate) fn folder_name(conn: &Connection, folder_id: FolderId) -> Result<String, QueryError> {
    Ok(require_folder(conn, folder_id)?.name)
}

pub(crate) fn folder_owner(conn: &Connection, folder_id: FolderId) -> Result<Address, QueryError> {
    Ok(require_folder(conn, folder_id)?.owner)
}

pub(crate) fn folder_members(conn: &Connection, folder_id: FolderId) -> Result<Vec<Address>, QueryError> {
    require_folder(conn, folder_id)?;
    Ok(member_addresses(conn, folder_id)?)
}

pub(crate) fn folder_member_entries(conn: &Connection, folder_id: FolderId) -> Result<Vec<MemberEntry>, QueryError> {
    require_folder(conn, folder_id)?;
    let mut stmt = conn.prepare(
        "SELECT address, permissions FROM folder_members WHERE folder_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![folder_id], |row| {
        Ok(MemberEntry {
            address: row.get(0)?,
            permissions: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(crate) fn folder_file_ids(conn: &Connection, folder_id: FolderId) -> Result<Vec<FileId>, QueryError> {
    require_folder(conn, folder_id)?;
    let mut stmt = conn.prepare("SELECT file_id FROM folder_files WHERE folder_id = ?1 ORDER BY file_id")?;
    let rows = stmt.query_map(params![folder_id], |row| row.get(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(crate) fn folder_file(conn: &Connection, folder_id: FolderId, file_id: FileId) -> Result<FolderFileEntry, QueryError> {
    require_folder(conn, folder_id)?;
    load_folder_file(conn, folder_id, file_id)?.ok_or(QueryError::FileNotAvailable(file_id))
}

pub(crate) fn folder_files(conn: &Connection, folder_id: FolderId) -> Result<Vec<FolderFileEntry>, QueryError> {
    require_folder(conn, folder_id)?;
    Ok(folder_files_in(conn, folder_id)?)
}

pub(crate) fn personal_file_ids(conn: &Connection, owner: &Address) -> Result<Vec<FileId>, QueryError> {
    Ok(personal_files_of(conn, owner)?.into_iter().map(|f| f.id).collect())
}

pub(crate) fn personal_file(conn: &Connection, owner: &Address, file_id: FileId) -> Result<PersonalFileEntry, QueryError> {
    load_personal_file(conn, owner, file_id)?.ok_or(QueryError::FileNotAvailable(file_id))
}

pub(crate) fn personal_files(conn: &Connection, owner: &Address) -> Result<Vec<PersonalFileEntry>, QueryError> {
    Ok(personal_files_of(conn, owner)?)
}

/// The stored flags of `address`, empty when it is not a member.
pub(crate) fn get_member_permissions(
    conn: &Connection,
    folder_id: FolderId,
    address: &Address,
) -> Result<Permissions, QueryError> {
    require_folder(conn, folder_id)?;
    Ok(member_permissions(conn, folder_id, address)?.unwrap_or_default())
}

/// What `caller` may actually do: everything for the owner, the stored flags otherwise.
pub(crate) fn my_permissions(conn: &Connection, folder_id: FolderId, caller: &Address) -> Result<Permissions, QueryError> {
    let row = require_folder(conn, folder_id)?;
    if row.owner == *caller {
        return Ok(Permissions::all());
    }
    Ok(member_permissions(conn, folder_id, caller)?.unwrap_or_default())
}

pub(crate) fn member_key(conn: &Connection, folder_id: FolderId, address: &Address) -> Result<WrappedKey, QueryError> {
    require_folder(conn, folder_id)?;
    conn.query_row(
        "SELECT wrapped_key FROM folder_members WHERE folder_id = ?1 AND address = ?2",
        params![folder_id, address],
        |row| row.get(0),
    )
    .optional()?
    .ok_or(QueryError::NotAMember(*address))
}

pub(crate) fn owned_folder_ids(conn: &Connection, owner: &Address) -> Result<Vec<FolderId>, QueryError> {
    Ok(owned_folder_ids_of(conn, owner)?)
}

fn folder_summaries(conn: &Connection, sql: &str, caller: &Address) -> Result<Vec<FolderSummary>, QueryError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![caller], |row| {
        Ok(FolderSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            owner: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Folders owned by `caller` in which `caller` is the only member.
pub(crate) fn personal_folders(conn: &Connection, caller: &Address) -> Result<Vec<FolderSummary>, QueryError> {
    let sql = format!(
        "SELECT f.id, f.name, f.owner FROM folders f
         WHERE f.owner = ?1 AND {IS_PERSONAL_FOLDER}
         ORDER BY f.id"
    );
    folder_summaries(conn, &sql, caller)
}

/// Folders `caller` owns or belongs to, minus personal folders.
pub(crate) fn group_folders(conn: &Connection, caller: &Address) -> Result<Vec<FolderSummary>, QueryError> {
    let sql = format!(
        "SELECT f.id, f.name, f.owner FROM folders f
         WHERE (f.owner = ?1
                OR EXISTS (SELECT 1 FROM folder_members m WHERE m.folder_id = f.id AND m.address = ?1))
           AND NOT ({IS_PERSONAL_FOLDER})
         ORDER BY f.id"
    );
    folder_summaries(conn, &sql, caller)
}

pub(crate) fn folder_count(conn: &Connection) -> Result<usize, QueryError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM folders", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub(crate) fn contract_owner(conn: &Connection) -> Result<Address, QueryError> {
    Ok(load_contract_owner(conn)?)
}

pub(crate) fn encryption_key(conn: &Connection, address: &Address) -> Result<Option<String>, QueryError> {
    Ok(load_encryption_key(conn, address)?)
}

pub(crate) fn ledger_metadata(conn: &Connection, key: &str) -> Result<String, QueryError> {
    conn.query_row(
        "SELECT meta_value FROM ledger_metadata WHERE meta_key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| QueryError::MetadataKeyNotFound(key.to_string()))
}
