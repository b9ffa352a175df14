use std::path::{Path, PathBuf};
use log::warn;
use rusqlite::Connection;
use crate::common::address::Address;
use crate::common::key::WrappedKey;
use crate::common::permissions::Permissions;
use crate::ledger::config::LedgerConfig;

pub mod config;
pub mod records;
mod account;
mod admin;
mod common;
mod create;
mod file;
mod folder;
mod member;
mod open;
mod query;

pub use account::AccountError;
pub use admin::AdminError;
pub use create::CreateError;
pub use file::FileError;
pub use folder::FolderError;
pub use member::MemberError;
pub use open::OpenError;
pub use query::QueryError;
pub use records::{
    AccountDeletion, FileId, FolderFileEntry, FolderId, FolderInfo, FolderSummary, MemberEntry,
    PersonalFileEntry,
};

/// 代表一个已打开的账本 (访问控制引擎)。
///
/// Holds every folder, membership and file record. Each mutating method takes
/// the caller's address and runs as one SQLite transaction: either all of its
/// checks pass and the whole effect is committed, or it returns an error and
/// nothing changes.
///
/// Writers need `&mut Ledger`, so operations are serialized by the borrow
/// checker.
pub struct Ledger {
    /// 账本的根目录路径 (内存账本为 `None`)。
    pub root_path: Option<PathBuf>,
    /// 账本的配置 (`ledger.json` 的内容)。
    pub config: LedgerConfig,
    /// （打开的）数据库连接。
    pub database_connection: Connection,
}

impl Ledger {
    /// Creates a new ledger in `ledger_path`, which must be empty or missing.
    /// `contract_owner` becomes the administrative owner.
    pub fn create_ledger(ledger_path: &Path, ledger_name: &str, contract_owner: &Address) -> Result<Self, CreateError> {
        create::create_ledger(ledger_path, ledger_name, contract_owner)
    }

    /// Opens the ledger stored in `ledger_path`.
    pub fn open_ledger(ledger_path: &Path) -> Result<Self, OpenError> {
        open::open_ledger(ledger_path)
    }

    /// 创建一个仅存在于内存中的全新账本。
    pub fn in_memory(contract_owner: &Address) -> Result<Self, CreateError> {
        let conn = Connection::open_in_memory()?;
        let config = LedgerConfig {
            name: "memory".to_string(),
            version: crate::common::constants::CURRENT_LEDGER_VERSION,
            database: PathBuf::from(":memory:"),
        };
        create::with_connection(conn, config, contract_owner)
    }

    // --- 管理 ---

    pub fn set_owner(&mut self, caller: &Address, new_owner: &Address) -> Result<(), AdminError> {
        admin::set_owner(self, caller, new_owner)
            .inspect_err(|e| warn!("set_owner by {} rejected: {}", caller, e))
    }

    pub fn contract_owner(&self) -> Result<Address, QueryError> {
        query::contract_owner(&self.database_connection)
    }

    // --- 文件夹 ---

    pub fn create_folder(
        &mut self,
        caller: &Address,
        name: &str,
        members: &[Address],
        keys: &[WrappedKey],
    ) -> Result<FolderId, FolderError> {
        folder::create_folder(self, caller, name, members, keys)
            .inspect_err(|e| warn!("create_folder by {} rejected: {}", caller, e))
    }

    /// Deletes the folder and returns the file records that went with it.
    pub fn delete_folder(&mut self, caller: &Address, folder_id: FolderId) -> Result<Vec<FolderFileEntry>, FolderError> {
        folder::delete_folder(self, caller, folder_id)
            .inspect_err(|e| warn!("delete_folder {} by {} rejected: {}", folder_id, caller, e))
    }

    pub fn leave_folder(&mut self, caller: &Address, folder_id: FolderId) -> Result<(), FolderError> {
        folder::leave_folder(self, caller, folder_id)
            .inspect_err(|e| warn!("leave_folder {} by {} rejected: {}", folder_id, caller, e))
    }

    pub fn rotate_folder_key(
        &mut self,
        caller: &Address,
        folder_id: FolderId,
        new_keys: &[WrappedKey],
    ) -> Result<(), FolderError> {
        folder::rotate_folder_key(self, caller, folder_id, new_keys)
            .inspect_err(|e| warn!("rotate_folder_key {} by {} rejected: {}", folder_id, caller, e))
    }

    // --- 成员 ---

    pub fn add_member(
        &mut self,
        caller: &Address,
        folder_id: FolderId,
        address: &Address,
        key: &WrappedKey,
    ) -> Result<(), MemberError> {
        member::add_member(self, caller, folder_id, address, key)
            .inspect_err(|e| warn!("add_member {} to {} by {} rejected: {}", address, folder_id, caller, e))
    }

    pub fn remove_member(&mut self, caller: &Address, folder_id: FolderId, address: &Address) -> Result<(), MemberError> {
        member::remove_member(self, caller, folder_id, address)
            .inspect_err(|e| warn!("remove_member {} from {} by {} rejected: {}", address, folder_id, caller, e))
    }

    pub fn set_member_permissions(
        &mut self,
        caller: &Address,
        folder_id: FolderId,
        address: &Address,
        permissions: Permissions,
    ) -> Result<(), MemberError> {
        member::set_member_permissions(self, caller, folder_id, address, permissions)
            .inspect_err(|e| warn!("set_member_permissions {} in {} by {} rejected: {}", address, folder_id, caller, e))
    }

    // --- 文件 ---

    pub fn upload_file(&mut self, caller: &Address, folder_id: FolderId, name: &str, cid: &str) -> Result<FileId, FileError> {
        file::upload_file(self, caller, folder_id, name, cid)
            .inspect_err(|e| warn!("upload_file to {} by {} rejected: {}", folder_id, caller, e))
    }

    pub fn upload_personal_file(&mut self, caller: &Address, name: &str, cid: &str) -> Result<FileId, FileError> {
        file::upload_personal_file(self, caller, name, cid)
            .inspect_err(|e| warn!("upload_personal_file by {} rejected: {}", caller, e))
    }

    pub fn delete_file(&mut self, caller: &Address, folder_id: FolderId, file_id: FileId) -> Result<FolderFileEntry, FileError> {
        file::delete_file(self, caller, folder_id, file_id)
            .inspect_err(|e| warn!("delete_file {}/{} by {} rejected: {}", folder_id, file_id, caller, e))
    }

    pub fn delete_personal_file(&mut self, caller: &Address, file_id: FileId) -> Result<PersonalFileEntry, FileError> {
        file::delete_personal_file(self, caller, file_id)
            .inspect_err(|e| warn!("delete_personal_file {} by {} rejected: {}", file_id, caller, e))
    }

    // --- 账户 ---

    pub fn register_encryption_key(&mut self, caller: &Address, public_key: &str) -> Result<(), AccountError> {
        account::register_encryption_key(self, caller, public_key)
            .inspect_err(|e| warn!("register_encryption_key by {} rejected: {}", caller, e))
    }

    /// Removes everything the ledger holds for `caller`. See [`AccountDeletion`].
    pub fn delete_account(&mut self, caller: &Address) -> Result<AccountDeletion, AccountError> {
        account::delete_account(self, caller)
            .inspect_err(|e| warn!("delete_account by {} rejected: {}", caller, e))
    }

    pub fn encryption_key(&self, address: &Address) -> Result<Option<String>, QueryError> {
        query::encryption_key(&self.database_connection, address)
    }

    /// Looks up several addresses at once; the result follows the input order.
    pub fn encryption_keys(&self, addresses: &[Address]) -> Result<Vec<Option<String>>, QueryError> {
        addresses
            .iter()
            .map(|address| self.encryption_key(address))
            .collect()
    }

    // --- 查询 ---

    pub fn folder(&self, folder_id: FolderId) -> Result<FolderInfo, QueryError> {
        query::folder(&self.database_connection, folder_id)
    }

    pub fn folder_name(&self, folder_id: FolderId) -> Result<String, QueryError> {
        query::folder_name(&self.database_connection, folder_id)
    }

    pub fn folder_owner(&self, folder_id: FolderId) -> Result<Address, QueryError> {
        query::folder_owner(&self.database_connection, folder_id)
    }

    /// Member addresses in member order, which is also the order
    /// `rotate_folder_key` applies keys in.
    pub fn folder_members(&self, folder_id: FolderId) -> Result<Vec<Address>, QueryError> {
        query::folder_members(&self.database_connection, folder_id)
    }

    pub fn folder_member_entries(&self, folder_id: FolderId) -> Result<Vec<MemberEntry>, QueryError> {
        query::folder_member_entries(&self.database_connection, folder_id)
    }

    pub fn folder_file_ids(&self, folder_id: FolderId) -> Result<Vec<FileId>, QueryError> {
        query::folder_file_ids(&self.database_connection, folder_id)
    }

    pub fn folder_file(&self, folder_id: FolderId, file_id: FileId) -> Result<FolderFileEntry, QueryError> {
        query::folder_file(&self.database_connection, folder_id, file_id)
    }

    pub fn folder_files(&self, folder_id: FolderId) -> Result<Vec<FolderFileEntry>, QueryError> {
        query::folder_files(&self.database_connection, folder_id)
    }

    pub fn personal_file_ids(&self, owner: &Address) -> Result<Vec<FileId>, QueryError> {
        query::personal_file_ids(&self.database_connection, owner)
    }

    pub fn personal_file(&self, owner: &Address, file_id: FileId) -> Result<PersonalFileEntry, QueryError> {
        query::personal_file(&self.database_connection, owner, file_id)
    }

    pub fn personal_files(&self, owner: &Address) -> Result<Vec<PersonalFileEntry>, QueryError> {
        query::personal_files(&self.database_connection, owner)
    }

    /// The flags stored for `address`. Empty for non-members; the owner's
    /// own entry (if any) is returned as stored.
    pub fn member_permissions(&self, folder_id: FolderId, address: &Address) -> Result<Permissions, QueryError> {
        query::get_member_permissions(&self.database_connection, folder_id, address)
    }

    /// The flags `caller` effectively holds. The folder owner holds all of them.
    pub fn my_permissions(&self, folder_id: FolderId, caller: &Address) -> Result<Permissions, QueryError> {
        query::my_permissions(&self.database_connection, folder_id, caller)
    }

    pub fn member_key(&self, folder_id: FolderId, address: &Address) -> Result<WrappedKey, QueryError> {
        query::member_key(&self.database_connection, folder_id, address)
    }

    /// 调用者自己的包装密钥。
    pub fn encrypted_folder_key(&self, folder_id: FolderId, caller: &Address) -> Result<WrappedKey, QueryError> {
        self.member_key(folder_id, caller)
    }

    pub fn owned_folder_ids(&self, owner: &Address) -> Result<Vec<FolderId>, QueryError> {
        query::owned_folder_ids(&self.database_connection, owner)
    }

    pub fn personal_folders(&self, caller: &Address) -> Result<Vec<FolderSummary>, QueryError> {
        query::personal_folders(&self.database_connection, caller)
    }

    pub fn group_folders(&self, caller: &Address) -> Result<Vec<FolderSummary>, QueryError> {
        query::group_folders(&self.database_connection, caller)
    }

    pub fn folder_count(&self) -> Result<usize, QueryError> {
        query::folder_count(&self.database_connection)
    }

    /// Reads a raw ledger metadata value, e.g. `META_LEDGER_UPDATE_TIME`.
    pub fn ledger_metadata(&self, key: &str) -> Result<String, QueryError> {
        query::ledger_metadata(&self.database_connection, key)
    }
}
