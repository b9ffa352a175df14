#![allow(dead_code)]

use std::path::PathBuf;
use filevault::common::address::Address;
use filevault::common::key::WrappedKey;
use filevault::common::permissions::Permissions;
use filevault::ledger::{FolderId, Ledger};
use tempfile::TempDir;

/// 辅助函数：由一个字节生成确定的测试地址，例如 `addr(1)` = `0x0101…01`。
pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

/// 辅助函数：由序号生成地址，用于需要大量不同地址的测试 (成员上限)。
pub fn nth_addr(i: u32) -> Address {
    let mut bytes = [0xaa; 20];
    bytes[..4].copy_from_slice(&i.to_be_bytes());
    Address::new(bytes)
}

/// 辅助函数：生成一个可辨认的包装密钥。
pub fn key(n: u8) -> WrappedKey {
    WrappedKey::new(vec![n; 8])
}

/// The administrative owner every test ledger is created with.
pub fn admin() -> Address {
    addr(0xad)
}

/// 辅助函数：创建一个全新的内存账本。
pub fn setup_ledger() -> Ledger {
    Ledger::in_memory(&admin()).unwrap()
}

/// 辅助函数：在临时目录中创建一个磁盘账本。
///
/// 返回 `(PathBuf, Ledger)`，让测试既能访问账本目录，又能获得 Ledger 实例。
pub fn setup_disk_ledger(dir: &TempDir) -> (PathBuf, Ledger) {
    let ledger_path = dir.path().join("test-ledger");
    let ledger = Ledger::create_ledger(&ledger_path, "test-ledger", &admin()).unwrap();
    (ledger_path, ledger)
}

/// 辅助函数：创建一个带有预置成员的群组文件夹。
///
/// 预置数据结构如下：
/// - owner:   addr(1)，同时也在成员列表中
/// - manager: addr(2)，拥有 MANAGE_PERMISSIONS
/// - member:  addr(3)，拥有 UPLOAD
/// - member:  addr(4)，没有任何权限
pub fn setup_group_folder(ledger: &mut Ledger) -> FolderId {
    let owner = addr(1);
    let members = [addr(1), addr(2), addr(3), addr(4)];
    let keys = [key(1), key(2), key(3), key(4)];
    let folder = ledger.create_folder(&owner, "group", &members, &keys).unwrap();
    ledger
        .set_member_permissions(&owner, folder, &addr(2), Permissions::MANAGE_PERMISSIONS)
        .unwrap();
    ledger
        .set_member_permissions(&owner, folder, &addr(3), Permissions::UPLOAD)
        .unwrap();
    folder
}
