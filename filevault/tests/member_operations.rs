use filevault::common::constants::MAX_FOLDER_MEMBERS;
use filevault::common::key::WrappedKey;
use filevault::common::permissions::Permissions;
use filevault::ledger::MemberError;

mod common;
use common::{addr, key, nth_addr, setup_group_folder, setup_ledger};

/// 端到端：创建无成员的文件夹 "G" -> 添加 addr1 成功 -> 再次添加 addr1 (任意密钥) 失败。
#[test]
fn test_add_member_then_readd_fails() {
    let mut ledger = setup_ledger();
    let owner = addr(0x0f);
    let folder = ledger.create_folder(&owner, "G", &[], &[]).unwrap();

    ledger.add_member(&owner, folder, &addr(1), &key(1)).unwrap();
    assert_eq!(ledger.folder_members(folder).unwrap(), vec![addr(1)]);
    assert_eq!(ledger.member_key(folder, &addr(1)).unwrap(), key(1));
    assert_eq!(ledger.member_permissions(folder, &addr(1)).unwrap(), Permissions::empty());

    let result = ledger.add_member(&owner, folder, &addr(1), &key(7));
    assert!(matches!(result, Err(MemberError::AlreadyMember(a)) if a == addr(1)));

    // 成员只增加了一个，且密钥没有被覆盖
    assert_eq!(ledger.folder_members(folder).unwrap(), vec![addr(1)]);
    assert_eq!(ledger.member_key(folder, &addr(1)).unwrap(), key(1));
}

/// 测试：管理者可以添加成员，新成员追加到列表末尾。
#[test]
fn test_manager_can_add_member() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger.add_member(&addr(2), folder, &addr(5), &key(5)).unwrap();
    assert_eq!(
        ledger.folder_members(folder).unwrap(),
        vec![addr(1), addr(2), addr(3), addr(4), addr(5)]
    );
}

/// 测试：没有 MANAGE_PERMISSIONS 的成员和非成员都不能添加成员。
#[test]
fn test_add_member_needs_manage() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    for caller in [addr(3), addr(4), addr(9)] {
        let result = ledger.add_member(&caller, folder, &addr(5), &key(5));
        assert!(matches!(
            result,
            Err(MemberError::PermissionDenied { caller: c, required })
                if c == caller && required == Permissions::MANAGE_PERMISSIONS
        ));
    }
    assert_eq!(ledger.folder_members(folder).unwrap().len(), 4);
}

#[test]
fn test_add_member_to_missing_folder() {
    let mut ledger = setup_ledger();
    let result = ledger.add_member(&addr(1), 7, &addr(2), &key(2));
    assert!(matches!(result, Err(MemberError::FolderNotFound(7))));
}

/// 测试：成员已满时不能再添加。
#[test]
fn test_add_member_limit() {
    let mut ledger = setup_ledger();
    let members: Vec<_> = (0..MAX_FOLDER_MEMBERS as u32).map(nth_addr).collect();
    let keys: Vec<_> = (0..MAX_FOLDER_MEMBERS).map(|i| WrappedKey::new(vec![i as u8])).collect();
    let folder = ledger.create_folder(&addr(1), "full", &members, &keys).unwrap();

    let result = ledger.add_member(&addr(1), folder, &addr(2), &key(2));
    assert!(matches!(result, Err(MemberError::MemberLimitReached(255))));
    assert_eq!(ledger.folder_members(folder).unwrap().len(), MAX_FOLDER_MEMBERS);
}

/// 测试：移除非成员失败，文件夹状态不变。
#[test]
fn test_remove_non_member() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);
    let before = ledger.folder_member_entries(folder).unwrap();

    let result = ledger.remove_member(&addr(1), folder, &addr(9));
    assert!(matches!(result, Err(MemberError::NotAMember(a)) if a == addr(9)));
    assert_eq!(ledger.folder_member_entries(folder).unwrap(), before);
}

/// 测试：非所有者的管理者通过 remove_member 移除自己会失败。
#[test]
fn test_manager_cannot_remove_self() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let result = ledger.remove_member(&addr(2), folder, &addr(2));
    assert!(matches!(result, Err(MemberError::CannotRemoveSelf)));
    assert!(ledger.folder_members(folder).unwrap().contains(&addr(2)));
}

/// 测试：管理者不能移除另一个管理者，所有者执行同样的调用则成功。
#[test]
fn test_manager_cannot_remove_manager_but_owner_can() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);
    ledger.add_member(&addr(1), folder, &addr(5), &key(5)).unwrap();
    ledger
        .set_member_permissions(&addr(1), folder, &addr(5), Permissions::MANAGE_PERMISSIONS)
        .unwrap();

    let result = ledger.remove_member(&addr(2), folder, &addr(5));
    assert!(matches!(result, Err(MemberError::CannotRemoveManager(a)) if a == addr(5)));
    assert!(ledger.folder_members(folder).unwrap().contains(&addr(5)));

    ledger.remove_member(&addr(1), folder, &addr(5)).unwrap();
    assert!(!ledger.folder_members(folder).unwrap().contains(&addr(5)));
}

/// 测试：管理者不能移除文件夹所有者。
#[test]
fn test_manager_cannot_remove_owner() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let result = ledger.remove_member(&addr(2), folder, &addr(1));
    assert!(matches!(result, Err(MemberError::CannotRemoveManager(a)) if a == addr(1)));
}

/// 测试：管理者可以移除普通成员；其余成员保持原有的相对顺序，密钥与权限一并删除。
#[test]
fn test_manager_removes_plain_member() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger.remove_member(&addr(2), folder, &addr(3)).unwrap();

    assert_eq!(ledger.folder_members(folder).unwrap(), vec![addr(1), addr(2), addr(4)]);
    assert_eq!(ledger.member_permissions(folder, &addr(3)).unwrap(), Permissions::empty());
    assert!(ledger.member_key(folder, &addr(3)).is_err());
    assert_eq!(ledger.member_key(folder, &addr(4)).unwrap(), key(4));

    // 被移除后可以重新加入，权限从空开始
    ledger.add_member(&addr(2), folder, &addr(3), &key(33)).unwrap();
    assert_eq!(ledger.folder_members(folder).unwrap(), vec![addr(1), addr(2), addr(4), addr(3)]);
    assert_eq!(ledger.member_permissions(folder, &addr(3)).unwrap(), Permissions::empty());
}

#[test]
fn test_plain_member_cannot_remove() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let result = ledger.remove_member(&addr(3), folder, &addr(4));
    assert!(matches!(result, Err(MemberError::PermissionDenied { .. })));
}

/// 测试：所有者可以把自己从成员列表中移除，但依旧是所有者。
#[test]
fn test_owner_removes_own_membership() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger.remove_member(&addr(1), folder, &addr(1)).unwrap();
    assert_eq!(ledger.folder_members(folder).unwrap(), vec![addr(2), addr(3), addr(4)]);
    assert_eq!(ledger.folder_owner(folder).unwrap(), addr(1));
    assert_eq!(ledger.my_permissions(folder, &addr(1)).unwrap(), Permissions::all());
}

/// 测试：设置权限是整体替换而不是按位合并。
#[test]
fn test_set_permissions_is_full_replace() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger
        .set_member_permissions(&addr(1), folder, &addr(4), Permissions::UPLOAD | Permissions::DELETE)
        .unwrap();
    assert_eq!(
        ledger.member_permissions(folder, &addr(4)).unwrap(),
        Permissions::UPLOAD | Permissions::DELETE
    );

    ledger
        .set_member_permissions(&addr(1), folder, &addr(4), Permissions::DELETE)
        .unwrap();
    assert_eq!(ledger.member_permissions(folder, &addr(4)).unwrap(), Permissions::DELETE);

    ledger
        .set_member_permissions(&addr(1), folder, &addr(4), Permissions::empty())
        .unwrap();
    assert_eq!(ledger.member_permissions(folder, &addr(4)).unwrap(), Permissions::empty());
}

/// 测试：管理者可以修改普通成员的权限，甚至把他们提升为管理者。
#[test]
fn test_manager_sets_plain_member_permissions() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger
        .set_member_permissions(&addr(2), folder, &addr(4), Permissions::all())
        .unwrap();
    assert_eq!(ledger.member_permissions(folder, &addr(4)).unwrap(), Permissions::all());
    assert_eq!(ledger.my_permissions(folder, &addr(4)).unwrap(), Permissions::all());
}

/// 测试：管理者不能修改其他管理者或所有者的权限，但可以修改自己的。
#[test]
fn test_manager_cannot_modify_other_manager() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);
    ledger
        .set_member_permissions(&addr(1), folder, &addr(4), Permissions::MANAGE_PERMISSIONS)
        .unwrap();

    let result = ledger.set_member_permissions(&addr(2), folder, &addr(4), Permissions::empty());
    assert!(matches!(result, Err(MemberError::CannotModifyManager(a)) if a == addr(4)));
    assert_eq!(ledger.member_permissions(folder, &addr(4)).unwrap(), Permissions::MANAGE_PERMISSIONS);

    let result = ledger.set_member_permissions(&addr(2), folder, &addr(1), Permissions::empty());
    assert!(matches!(result, Err(MemberError::CannotModifyManager(a)) if a == addr(1)));

    ledger
        .set_member_permissions(&addr(2), folder, &addr(2), Permissions::MANAGE_PERMISSIONS | Permissions::UPLOAD)
        .unwrap();
    assert_eq!(
        ledger.member_permissions(folder, &addr(2)).unwrap(),
        Permissions::MANAGE_PERMISSIONS | Permissions::UPLOAD
    );
}

#[test]
fn test_set_permissions_on_non_member() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let result = ledger.set_member_permissions(&addr(1), folder, &addr(9), Permissions::UPLOAD);
    assert!(matches!(result, Err(MemberError::NotAMember(a)) if a == addr(9)));
}

#[test]
fn test_set_permissions_needs_manage() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let result = ledger.set_member_permissions(&addr(3), folder, &addr(3), Permissions::all());
    assert!(matches!(result, Err(MemberError::PermissionDenied { .. })));
    assert_eq!(ledger.member_permissions(folder, &addr(3)).unwrap(), Permissions::UPLOAD);
}

/// 测试：一个被降级的管理者立即失去管理能力。
#[test]
fn test_demoted_manager_loses_powers() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    ledger
        .set_member_permissions(&addr(1), folder, &addr(2), Permissions::UPLOAD)
        .unwrap();
    let result = ledger.add_member(&addr(2), folder, &addr(5), &key(5));
    assert!(matches!(result, Err(MemberError::PermissionDenied { .. })));
}
