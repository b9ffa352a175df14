use filevault::common::address::Address;
use filevault::common::key::WrappedKey;
use filevault::common::permissions::Permissions;
use filevault::ledger::{FolderId, FolderInfo, FolderSummary, Ledger, MemberEntry};
use crate::errors::CliError;
use crate::ui::printer::print_released_cids;
use crate::ui::prompt::confirm_action;

/// Everything `folder info` shows about one folder.
pub struct FolderDetails {
    pub info: FolderInfo,
    pub members: Vec<MemberEntry>,
    /// The effective flags of the current identity.
    pub my_permissions: Permissions,
    pub file_count: usize,
}

/// The current identity's folders, split the way the dApp lists them.
pub struct FolderListing {
    pub personal: Vec<FolderSummary>,
    pub group: Vec<FolderSummary>,
}

pub fn handle_folder_create(
    ledger: &mut Ledger,
    caller: &Address,
    name: &str,
    members: &[Address],
    keys: &[WrappedKey],
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidName("Folder name cannot be empty.".to_string()));
    }
    let id = ledger.create_folder(caller, name, members, keys)?;
    println!("Folder '{}' created with id {} ({} member(s)).", name, id, members.len());
    Ok(())
}

/// 删除文件夹。删除成功后才列出需要取消固定的 CID。
pub fn handle_folder_delete(
    ledger: &mut Ledger,
    caller: &Address,
    id: FolderId,
    yes: bool,
) -> Result<(), CliError> {
    if !yes {
        let name = ledger.folder_name(id)?;
        let prompt = format!("Delete folder {} ('{}') and all of its files?", id, name);
        if !confirm_action(&prompt)? {
            return Err(CliError::ConfirmationFailed);
        }
    }

    let removed = ledger.delete_folder(caller, id)?;
    println!("Folder {} deleted ({} file(s) removed).", id, removed.len());
    print_released_cids(removed.iter().map(|f| f.cid.as_str()));
    Ok(())
}

pub fn handle_folder_leave(ledger: &mut Ledger, caller: &Address, id: FolderId) -> Result<(), CliError> {
    ledger.leave_folder(caller, id)?;
    println!("Left folder {}.", id);
    Ok(())
}

pub fn handle_folder_rotate(
    ledger: &mut Ledger,
    caller: &Address,
    id: FolderId,
    keys: &[WrappedKey],
) -> Result<(), CliError> {
    ledger.rotate_folder_key(caller, id, keys)?;
    println!("Rotated the key of folder {} for {} member(s).", id, keys.len());
    Ok(())
}

pub fn handle_folder_info(ledger: &Ledger, identity: &Address, id: FolderId) -> Result<FolderDetails, CliError> {
    Ok(FolderDetails {
        info: ledger.folder(id)?,
        members: ledger.folder_member_entries(id)?,
        my_permissions: ledger.my_permissions(id, identity)?,
        file_count: ledger.folder_file_ids(id)?.len(),
    })
}

pub fn handle_folder_list(ledger: &Ledger, identity: &Address) -> Result<FolderListing, CliError> {
    Ok(FolderListing {
        personal: ledger.personal_folders(identity)?,
        group: ledger.group_folders(identity)?,
    })
}
