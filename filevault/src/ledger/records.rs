use serde::{Deserialize, Serialize};
use crate::common::address::Address;
use crate::common::permissions::Permissions;

/// Globally unique, sequential folder identifier starting at 0. Never reused.
pub type FolderId = i64;

/// Sequential file identifier, unique within its folder or personal scope.
pub type FileId = i64;

/// A folder as seen through the read accessors.
//
// // 通过只读访问器看到的文件夹。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub id: FolderId,
    pub name: String,
    /// The creator of the folder. Never changes.
    pub owner: Address,
    /// Members in key order (the order `rotate_folder_key` expects).
    pub members: Vec<Address>,
    pub created_at: String,
}

impl FolderInfo {
    /// A personal folder is one whose only member is its owner.
    pub fn is_personal(&self) -> bool {
        self.members.len() == 1 && self.members[0] == self.owner
    }
}

/// Short listing row for folder overviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    pub id: FolderId,
    pub name: String,
    pub owner: Address,
}

/// One member of a folder together with its permission flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub address: Address,
    pub permissions: Permissions,
}

/// A file record stored inside a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFileEntry {
    pub folder_id: FolderId,
    pub id: FileId,
    pub name: String,
    /// Content identifier of the (already encrypted) payload. Opaque to the ledger.
    pub cid: String,
    pub uploader: Address,
    pub created_at: String,
}

/// A file record in an address's personal space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalFileEntry {
    pub owner: Address,
    pub id: FileId,
    pub name: String,
    pub cid: String,
    pub created_at: String,
}

/// Everything removed by `Ledger::delete_account`.
///
/// The file records are returned so that the caller can release the content
/// behind their CIDs once the deletion has been committed.
//
// // `delete_account` 删除的全部内容。返回文件记录，以便调用方在提交后取消固定 (unpin) 内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeletion {
    pub personal_files: Vec<PersonalFileEntry>,
    pub folder_files: Vec<FolderFileEntry>,
    /// Folders owned by the account, deleted together with their files.
    pub deleted_folders: Vec<FolderId>,
    /// Folders owned by someone else that the account was removed from.
    pub left_folders: Vec<FolderId>,
}

impl AccountDeletion {
    /// All CIDs that are no longer referenced by the ledger.
    pub fn cids(&self) -> impl Iterator<Item = &str> {
        self.personal_files
            .iter()
            .map(|f| f.cid.as_str())
            .chain(self.folder_files.iter().map(|f| f.cid.as_str()))
    }
}
