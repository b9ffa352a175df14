use filevault::common::address::Address;
use filevault::common::key::WrappedKey;
use filevault::common::permissions::Permissions;
use filevault::ledger::{FolderId, Ledger, MemberEntry};
use crate::errors::CliError;

pub fn handle_member_add(
    ledger: &mut Ledger,
    caller: &Address,
    folder: FolderId,
    address: &Address,
    key: &WrappedKey,
) -> Result<(), CliError> {
    ledger.add_member(caller, folder, address, key)?;
    println!("Added {} to folder {}.", address, folder);
    Ok(())
}

pub fn handle_member_remove(
    ledger: &mut Ledger,
    caller: &Address,
    folder: FolderId,
    address: &Address,
) -> Result<(), CliError> {
    ledger.remove_member(caller, folder, address)?;
    println!("Removed {} from folder {}.", address, folder);
    // 剩余成员仍持有旧密钥，提醒调用者轮换
    println!("Remember to rotate the folder key for the remaining members.");
    Ok(())
}

pub fn handle_member_perms(
    ledger: &mut Ledger,
    caller: &Address,
    folder: FolderId,
    address: &Address,
    permissions: Permissions,
) -> Result<(), CliError> {
    ledger.set_member_permissions(caller, folder, address, permissions)?;
    println!("Permissions of {} in folder {} set to {}.", address, folder, permissions);
    Ok(())
}

/// 返回 (所有者, 成员列表)。
pub fn handle_member_list(ledger: &Ledger, folder: FolderId) -> Result<(Address, Vec<MemberEntry>), CliError> {
    Ok((ledger.folder_owner(folder)?, ledger.folder_member_entries(folder)?))
}
