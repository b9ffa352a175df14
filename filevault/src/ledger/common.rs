use rusqlite::{Connection, OptionalExtension, Row, params};
use crate::common::address::Address;
use crate::common::constants::META_LEDGER_UPDATE_TIME;
use crate::common::permissions::Permissions;
use crate::ledger::records::{FileId, FolderFileEntry, FolderId, PersonalFileEntry};
use crate::utils::time::now_as_rfc3339_string;

/// Name of the sequence that hands out folder ids.
pub(crate) const SEQ_FOLDERS: &str = "folders";

/// 文件夹表中的一行。
#[derive(Debug, Clone)]
pub(crate) struct FolderRow {
    pub id: FolderId,
    pub name: String,
    pub owner: Address,
    pub next_file_id: FileId,
    pub created_at: String,
}

/// The caller's standing with respect to one folder.
///
/// Ownership is kept apart from the permission flags: an owner is authorized
/// for everything whether or not they are listed as a member, and there is no
/// bitmask that could demote them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Access {
    pub is_owner: bool,
    /// `None` when the caller is not in the member list.
    pub permissions: Option<Permissions>,
}

impl Access {
    pub fn resolve(conn: &Connection, folder: &FolderRow, caller: &Address) -> rusqlite::Result<Self> {
        Ok(Access {
            is_owner: folder.owner == *caller,
            permissions: member_permissions(conn, folder.id, caller)?,
        })
    }

    /// `is_owner || has_flag(flag)`
    pub fn allows(&self, flag: Permissions) -> bool {
        self.is_owner || self.permissions.is_some_and(|p| p.contains(flag))
    }
}

/// Loads a folder row, or `None` if the id was never used or has been deleted.
pub(crate) fn load_folder(conn: &Connection, folder_id: FolderId) -> rusqlite::Result<Option<FolderRow>> {
    conn.query_row(
        "SELECT id, name, owner, next_file_id, created_at FROM folders WHERE id = ?1",
        params![folder_id],
        |row| {
            Ok(FolderRow {
                id: row.get(0)?,
                name: row.get(1)?,
                owner: row.get(2)?,
                next_file_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        },
    )
    .optional()
}

/// Returns the member's flags, or `None` if `address` is not a member.
pub(crate) fn member_permissions(
    conn: &Connection,
    folder_id: FolderId,
    address: &Address,
) -> rusqlite::Result<Option<Permissions>> {
    conn.query_row(
        "SELECT permissions FROM folder_members WHERE folder_id = ?1 AND address = ?2",
        params![folder_id, address],
        |row| row.get(0),
    )
    .optional()
}

pub(crate) fn member_count(conn: &Connection, folder_id: FolderId) -> rusqlite::Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM folder_members WHERE folder_id = ?1",
        params![folder_id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Member addresses in position order.
pub(crate) fn member_addresses(conn: &Connection, folder_id: FolderId) -> rusqlite::Result<Vec<Address>> {
    let mut stmt = conn.prepare(
        "SELECT address FROM folder_members WHERE folder_id = ?1 ORDER BY position",
    )?;
    stmt.query_map(params![folder_id], |row| row.get(0))?
        .collect()
}

/// Removes one membership row and closes the gap it leaves in the positions,
/// so that the remaining members keep their relative order.
pub(crate) fn delete_member_row(conn: &Connection, folder_id: FolderId, address: &Address) -> rusqlite::Result<()> {
    let position: Option<i64> = conn
        .query_row(
            "SELECT position FROM folder_members WHERE folder_id = ?1 AND address = ?2",
            params![folder_id, address],
            |row| row.get(0),
        )
        .optional()?;

    if let Some(position) = position {
        conn.execute(
            "DELETE FROM folder_members WHERE folder_id = ?1 AND address = ?2",
            params![folder_id, address],
        )?;
        conn.execute(
            "UPDATE folder_members SET position = position - 1 WHERE folder_id = ?1 AND position > ?2",
            params![folder_id, position],
        )?;
    }
    Ok(())
}

fn map_folder_file(row: &Row<'_>) -> rusqlite::Result<FolderFileEntry> {
    Ok(FolderFileEntry {
        folder_id: row.get(0)?,
        id: row.get(1)?,
        name: row.get(2)?,
        cid: row.get(3)?,
        uploader: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_personal_file(row: &Row<'_>) -> rusqlite::Result<PersonalFileEntry> {
    Ok(PersonalFileEntry {
        owner: row.get(0)?,
        id: row.get(1)?,
        name: row.get(2)?,
        cid: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub(crate) fn load_folder_file(
    conn: &Connection,
    folder_id: FolderId,
    file_id: FileId,
) -> rusqlite::Result<Option<FolderFileEntry>> {
    conn.query_row(
        "SELECT folder_id, file_id, name, cid, uploader, created_at
         FROM folder_files WHERE folder_id = ?1 AND file_id = ?2",
        params![folder_id, file_id],
        map_folder_file,
    )
    .optional()
}

pub(crate) fn folder_files_in(conn: &Connection, folder_id: FolderId) -> rusqlite::Result<Vec<FolderFileEntry>> {
    let mut stmt = conn.prepare(
        "SELECT folder_id, file_id, name, cid, uploader, created_at
         FROM folder_files WHERE folder_id = ?1 ORDER BY file_id",
    )?;
    stmt.query_map(params![folder_id], map_folder_file)?.collect()
}

pub(crate) fn load_personal_file(
    conn: &Connection,
    owner: &Address,
    file_id: FileId,
) -> rusqlite::Result<Option<PersonalFileEntry>> {
    conn.query_row(
        "SELECT owner, file_id, name, cid, created_at
         FROM personal_files WHERE owner = ?1 AND file_id = ?2",
        params![owner, file_id],
        map_personal_file,
    )
    .optional()
}

pub(crate) fn personal_files_of(conn: &Connection, owner: &Address) -> rusqlite::Result<Vec<PersonalFileEntry>> {
    let mut stmt = conn.prepare(
        "SELECT owner, file_id, name, cid, created_at
         FROM personal_files WHERE owner = ?1 ORDER BY file_id",
    )?;
    stmt.query_map(params![owner], map_personal_file)?.collect()
}

pub(crate) fn owned_folder_ids_of(conn: &Connection, owner: &Address) -> rusqlite::Result<Vec<FolderId>> {
    let mut stmt = conn.prepare("SELECT id FROM folders WHERE owner = ?1 ORDER BY id")?;
    stmt.query_map(params![owner], |row| row.get(0))?.collect()
}

/// Makes sure an `accounts` row exists for `address`.
pub(crate) fn ensure_account(conn: &Connection, address: &Address) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO accounts (address, encryption_key, next_personal_file_id) VALUES (?1, NULL, 0)",
        params![address],
    )?;
    Ok(())
}

/// Returns the current value of a sequence and advances it by one.
pub(crate) fn next_sequence(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    let current: i64 = conn.query_row(
        "SELECT next_value FROM sequences WHERE name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    conn.execute(
        "UPDATE sequences SET next_value = next_value + 1 WHERE name = ?1",
        params![name],
    )?;
    Ok(current)
}

/// 更新账本的最后修改时间 (`_filevault_update_time`)。
pub(crate) fn touch_ledger_update_time(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO ledger_metadata (meta_key, meta_value) VALUES (?1, ?2)",
        params![META_LEDGER_UPDATE_TIME, now_as_rfc3339_string()],
    )?;
    Ok(())
}
