use filevault::common::permissions::Permissions;
use filevault::ledger::{FolderSummary, QueryError};

mod common;
use common::{addr, key, setup_group_folder, setup_ledger};

fn ids(folders: &[FolderSummary]) -> Vec<i64> {
    folders.iter().map(|f| f.id).collect()
}

/// 测试：个人文件夹与群组文件夹的分类。
/// - 个人文件夹：调用者拥有，且唯一成员就是调用者。
/// - 群组文件夹：调用者拥有或所属的其他所有文件夹。
#[test]
fn test_personal_and_group_folders() {
    let mut ledger = setup_ledger();
    let me = addr(1);

    let group = setup_group_folder(&mut ledger);
    let personal = ledger.create_folder(&me, "Personal", &[me], &[key(1)]).unwrap();
    let empty = ledger.create_folder(&me, "empty", &[], &[]).unwrap();
    let delegated = ledger.create_folder(&me, "delegated", &[addr(2)], &[key(2)]).unwrap();
    let foreign = ledger.create_folder(&addr(7), "foreign", &[me], &[key(1)]).unwrap();
    let unrelated = ledger.create_folder(&addr(7), "unrelated", &[addr(7)], &[key(7)]).unwrap();

    let personal_folders = ledger.personal_folders(&me).unwrap();
    assert_eq!(ids(&personal_folders), vec![personal]);
    assert_eq!(personal_folders[0].name, "Personal");
    assert!(ledger.folder(personal).unwrap().is_personal());

    let group_folders = ledger.group_folders(&me).unwrap();
    assert_eq!(ids(&group_folders), vec![group, empty, delegated, foreign]);
    assert!(!ids(&group_folders).contains(&unrelated));

    // addr(2) 拥有的文件夹为零，但属于两个群组
    assert!(ledger.personal_folders(&addr(2)).unwrap().is_empty());
    assert_eq!(ids(&ledger.group_folders(&addr(2)).unwrap()), vec![group, delegated]);

    assert_eq!(ids(&ledger.personal_folders(&addr(7)).unwrap()), vec![unrelated]);
}

/// 测试：个人文件夹加入第二个成员后变成群组文件夹。
#[test]
fn test_personal_folder_becomes_group() {
    let mut ledger = setup_ledger();
    let me = addr(1);
    let folder = ledger.create_folder(&me, "Personal", &[me], &[key(1)]).unwrap();

    ledger.add_member(&me, folder, &addr(2), &key(2)).unwrap();
    assert!(ledger.personal_folders(&me).unwrap().is_empty());
    assert_eq!(ids(&ledger.group_folders(&me).unwrap()), vec![folder]);

    ledger.remove_member(&me, folder, &addr(2)).unwrap();
    assert_eq!(ids(&ledger.personal_folders(&me).unwrap()), vec![folder]);
}

/// 测试：member_permissions 返回存储值，my_permissions 返回实际有效的权限。
#[test]
fn test_member_and_effective_permissions() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    // 所有者作为成员时的存储值为空，但实际拥有全部权限
    assert_eq!(ledger.member_permissions(folder, &addr(1)).unwrap(), Permissions::empty());
    assert_eq!(ledger.my_permissions(folder, &addr(1)).unwrap(), Permissions::all());

    assert_eq!(ledger.member_permissions(folder, &addr(2)).unwrap(), Permissions::MANAGE_PERMISSIONS);
    assert_eq!(ledger.my_permissions(folder, &addr(3)).unwrap(), Permissions::UPLOAD);
    assert_eq!(ledger.my_permissions(folder, &addr(9)).unwrap(), Permissions::empty());

    assert!(matches!(ledger.my_permissions(99, &addr(1)), Err(QueryError::FolderNotFound(99))));
}

#[test]
fn test_member_entries_follow_member_order() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);

    let entries = ledger.folder_member_entries(folder).unwrap();
    let pairs: Vec<_> = entries.iter().map(|e| (e.address, e.permissions)).collect();
    assert_eq!(
        pairs,
        vec![
            (addr(1), Permissions::empty()),
            (addr(2), Permissions::MANAGE_PERMISSIONS),
            (addr(3), Permissions::UPLOAD),
            (addr(4), Permissions::empty()),
        ]
    );
}

/// 测试：调用者只能取回属于自己的包装密钥；非成员报告 NotAMember。
#[test]
fn test_encrypted_folder_key() {
    let mut ledger = setup_ledger();
    let folder = ledger.create_folder(&addr(1), "G", &[addr(2)], &[key(2)]).unwrap();

    assert_eq!(ledger.encrypted_folder_key(folder, &addr(2)).unwrap(), key(2));
    // 未列为成员的所有者没有包装密钥
    assert!(matches!(
        ledger.encrypted_folder_key(folder, &addr(1)),
        Err(QueryError::NotAMember(a)) if a == addr(1)
    ));
}

/// 测试：没有中间写操作时，重复查询返回完全相同的结果。
#[test]
fn test_queries_are_idempotent() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);
    ledger.upload_file(&addr(1), folder, "a", "cid-a").unwrap();
    ledger.upload_personal_file(&addr(1), "p", "cid-p").unwrap();

    assert_eq!(ledger.folder(folder).unwrap(), ledger.folder(folder).unwrap());
    assert_eq!(ledger.folder_files(folder).unwrap(), ledger.folder_files(folder).unwrap());
    assert_eq!(ledger.personal_files(&addr(1)).unwrap(), ledger.personal_files(&addr(1)).unwrap());
    assert_eq!(ledger.group_folders(&addr(1)).unwrap(), ledger.group_folders(&addr(1)).unwrap());
}

/// 测试：简单访问器与 `folder()` 返回的字段一致。
#[test]
fn test_accessors_agree_with_folder_info() {
    let mut ledger = setup_ledger();
    let folder = setup_group_folder(&mut ledger);
    let info = ledger.folder(folder).unwrap();

    assert_eq!(ledger.folder_name(folder).unwrap(), info.name);
    assert_eq!(ledger.folder_owner(folder).unwrap(), info.owner);
    assert_eq!(ledger.folder_members(folder).unwrap(), info.members);
    assert!(!info.created_at.is_empty());
    assert_eq!(ledger.owned_folder_ids(&addr(1)).unwrap(), vec![folder]);
    assert!(ledger.owned_folder_ids(&addr(2)).unwrap().is_empty());
}

#[test]
fn test_missing_records() {
    let mut ledger = setup_ledger();
    let folder = ledger.create_folder(&addr(1), "G", &[], &[]).unwrap();

    assert!(matches!(ledger.folder_name(5), Err(QueryError::FolderNotFound(5))));
    assert!(matches!(ledger.folder_members(5), Err(QueryError::FolderNotFound(5))));
    assert!(matches!(ledger.folder_file(folder, 0), Err(QueryError::FileNotAvailable(0))));
    assert!(ledger.folder_file_ids(folder).unwrap().is_empty());
    assert!(ledger.personal_file_ids(&addr(1)).unwrap().is_empty());
}
