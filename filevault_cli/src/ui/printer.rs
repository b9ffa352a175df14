//! Functions for printing ledger records to the console.

use chrono::{DateTime, Local, Utc};
use filevault::common::address::Address;
use filevault::ledger::{AccountDeletion, FolderSummary, MemberEntry};
use crate::handlers::file::FileListing;
use crate::handlers::folder::{FolderDetails, FolderListing};
use crate::handlers::status::LedgerStatus;
use crate::ui::formatter::{format_local_time, permission_badge};

const SEPARATOR: &str = "----------------------------------------";

/// Takes the result from the status handler and prints it to the console.
pub fn print_status(status: &LedgerStatus) {
    let format_time = |time: Option<DateTime<Utc>>| -> String {
        time.map(|utc_time| {
            let local_time = utc_time.with_timezone(&Local);
            local_time.format("%Y-%m-%d %H:%M:%S %Z").to_string()
        })
        .unwrap_or_else(|| "N/A".to_string())
    };

    let path_display = status
        .path
        .as_ref()
        .map(|p| format!("{:?}", p))
        .unwrap_or_else(|| "(in memory)".to_string());

    println!("--- Ledger Status ---");
    println!("  Name:           {}", status.name);
    println!("  Path:           {}", path_display);
    println!("  Version:        {}", status.version);
    println!("  Contract Owner: {}", status.contract_owner);
    println!("  Identity:       {}", status.identity);
    println!("  Total Folders:  {}", status.folder_count);
    println!("  Owned Folders:  {}", status.owned_folder_count);
    println!("  Personal Files: {}", status.personal_file_count);
    println!("  Created At:     {}", format_time(status.created_at));
    println!("  Last Updated:   {}", format_time(status.updated_at));
    println!("---------------------");
}

/// 打印文件夹详情 (`folder info`)
pub fn print_folder_details(details: &FolderDetails) {
    let info = &details.info;
    let kind = if info.is_personal() { "Personal" } else { "Group" };

    println!("{}", SEPARATOR);
    println!("  Folder:          {} ({})", info.name, info.id);
    println!("  Type:            {}", kind);
    println!("  Owner:           {}", info.owner);
    println!("  Created At:      {}", format_local_time(&info.created_at));
    println!("  Files:           {}", details.file_count);
    println!("  Your Permissions: {}", details.my_permissions);
    println!("  Members ({}):", details.members.len());
    for (position, member) in details.members.iter().enumerate() {
        print_member_line(position, member, &info.owner);
    }
    println!("{}", SEPARATOR);
}

/// 打印成员列表 (`member ls`)
pub fn print_member_list(owner: &Address, members: &[MemberEntry]) {
    println!("Owner: {}", owner);
    if members.is_empty() {
        println!("(no members)");
        return;
    }
    for (position, member) in members.iter().enumerate() {
        print_member_line(position, member, owner);
    }
}

// 格式: {位置} {权限标记} {地址} [owner]
fn print_member_line(position: usize, member: &MemberEntry, owner: &Address) {
    let owner_mark = if member.address == *owner { " (owner)" } else { "" };
    println!(
        "    {:>3}  [{}]  {}{}",
        position,
        permission_badge(member.permissions),
        member.address,
        owner_mark
    );
}

/// 按个人/群组两组打印文件夹 (`folder ls`)
pub fn print_folder_listing(listing: &FolderListing) {
    print_folder_group("Personal folders", &listing.personal);
    print_folder_group("Group folders", &listing.group);
}

fn print_folder_group(title: &str, folders: &[FolderSummary]) {
    println!("{}:", title);
    if folders.is_empty() {
        println!("  (empty)");
        return;
    }
    for folder in folders {
        println!("  {:>5}  {}  (owner {})", folder.id, folder.name, folder.owner);
    }
}

/// 打印文件列表 (`file ls`)
pub fn print_file_listing(listing: &FileListing) {
    match listing {
        FileListing::Folder(folder_id, files) => {
            println!("Files in folder {}:", folder_id);
            if files.is_empty() {
                println!("(empty)");
                return;
            }
            for file in files {
                println!(
                    "{:>5}  {:<24} {}  by {}  at {}",
                    file.id,
                    file.name,
                    file.cid,
                    file.uploader,
                    format_local_time(&file.created_at)
                );
            }
        }
        FileListing::Personal(files) => {
            println!("Personal files:");
            if files.is_empty() {
                println!("(empty)");
                return;
            }
            for file in files {
                println!(
                    "{:>5}  {:<24} {}  at {}",
                    file.id,
                    file.name,
                    file.cid,
                    format_local_time(&file.created_at)
                );
            }
        }
    }
}

/// 打印公钥查询结果 (`key show`)
pub fn print_encryption_keys(keys: &[(Address, Option<String>)]) {
    for (address, key) in keys {
        match key {
            Some(key) => println!("{}  {}", address, key),
            None => println!("{}  (not registered)", address),
        }
    }
}

/// 列出已不再被账本引用的 CID，提示调用方取消固定。
pub fn print_released_cids<'a>(cids: impl Iterator<Item = &'a str>) {
    let cids: Vec<&str> = cids.collect();
    if cids.is_empty() {
        return;
    }
    println!("Content no longer referenced (safe to unpin):");
    for cid in cids {
        println!("  {}", cid);
    }
}

/// 打印账户删除的汇总
pub fn print_account_deletion(caller: &Address, deletion: &AccountDeletion) {
    println!("Account {} deleted.", caller);
    println!("  Personal files removed: {}", deletion.personal_files.len());
    println!("  Folders deleted:        {}", deletion.deleted_folders.len());
    println!("  Folders left:           {}", deletion.left_folders.len());
    print_released_cids(deletion.cids());
}
