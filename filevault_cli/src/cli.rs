use std::path::PathBuf;
use clap::{Parser, Subcommand};
use filevault::common::address::Address;
use filevault::common::key::WrappedKey;
use filevault::common::permissions::Permissions;
use filevault::ledger::{FileId, FolderId};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: TopLevelCommands,
}

#[derive(Subcommand, Debug)]
pub enum TopLevelCommands {
    /// 在指定父目录下创建一个新账本 (名称从标准输入读取)
    Create {
        #[arg(value_name = "PARENT_PATH")]
        path: Option<PathBuf>,

        /// 账本的管理员 (合约所有者) 地址，同时作为初始身份
        #[arg(long = "owner", value_name = "ADDRESS")]
        owner: Address,
    },
    /// 打开一个已存在的账本
    Open {
        #[arg(value_name = "LEDGER_PATH")]
        path: Option<PathBuf>,
    },
}

// --- REPL (交互式) 命令定义 ---
#[derive(Parser, Debug)]
#[command(no_binary_name = true, about = "REPL commands")]
pub enum ReplCommand {
    /// 切换当前身份 (之后的所有操作都以该地址作为调用者)
    As {
        #[arg(required = true)]
        address: Address,
    },
    /// 显示当前身份
    Whoami,
    /// 显示当前账本的状态
    Status,
    /// 管理员 (合约所有者) 相关命令
    #[command(subcommand)]
    Owner(OwnerCommand),
    /// 加密公钥注册
    #[command(subcommand)]
    Key(KeyCommand),
    /// 文件夹操作
    #[command(subcommand)]
    Folder(FolderCommand),
    /// 成员与权限操作
    #[command(subcommand)]
    Member(MemberCommand),
    /// 文件记录操作 (不指定 --folder 时作用于个人空间)
    #[command(subcommand)]
    File(FileCommand),
    /// 账户操作
    #[command(subcommand)]
    Account(AccountCommand),
    /// 退出交互式会话
    #[command(visible_alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug)]
pub enum OwnerCommand {
    /// 显示当前的合约所有者
    Show,
    /// 将管理员角色转移给另一个地址
    Set {
        #[arg(required = true)]
        new_owner: Address,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommand {
    /// 为当前身份注册加密公钥
    Register {
        #[arg(required = true)]
        public_key: String,
    },
    /// 显示一个或多个地址的加密公钥 (默认当前身份)
    Show {
        addresses: Vec<Address>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// 创建文件夹，当前身份成为所有者
    Create {
        #[arg(required = true)]
        name: String,

        /// 初始成员，可重复；与 --key 按顺序一一对应
        #[arg(short = 'm', long = "member", value_name = "ADDRESS")]
        members: Vec<Address>,

        /// 初始成员的包装密钥 (十六进制)，可重复
        #[arg(short = 'k', long = "key", value_name = "HEX")]
        keys: Vec<WrappedKey>,
    },
    /// 删除文件夹及其中所有文件
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(required = true)]
        id: FolderId,

        /// 跳过确认
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
    /// 离开一个文件夹
    Leave {
        #[arg(required = true)]
        id: FolderId,
    },
    /// 按成员顺序替换所有成员的包装密钥
    Rotate {
        #[arg(required = true)]
        id: FolderId,

        #[arg(value_name = "HEX")]
        keys: Vec<WrappedKey>,
    },
    /// 显示文件夹详情
    Info {
        #[arg(required = true)]
        id: FolderId,
    },
    /// 列出当前身份的个人文件夹与群组文件夹
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// 添加成员 (初始没有任何权限)
    Add {
        folder: FolderId,
        address: Address,
        #[arg(value_name = "HEX")]
        key: WrappedKey,
    },
    /// 移除成员
    #[command(visible_alias = "rm")]
    Remove {
        folder: FolderId,
        address: Address,
    },
    /// 整体替换成员的权限，例如 `upload|delete`、`none` 或 `0b101`
    Perms {
        folder: FolderId,
        address: Address,
        permissions: Permissions,
    },
    /// 列出成员及其权限
    #[command(visible_alias = "ls")]
    List {
        folder: FolderId,
    },
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// 记录一个已上传内容的文件
    Upload {
        name: String,
        cid: String,

        #[arg(short = 'f', long = "folder")]
        folder: Option<FolderId>,
    },
    /// 删除文件记录
    Rm {
        id: FileId,

        #[arg(short = 'f', long = "folder")]
        folder: Option<FolderId>,
    },
    /// 列出文件记录
    Ls {
        #[arg(short = 'f', long = "folder")]
        folder: Option<FolderId>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// 删除当前身份的全部数据
    Delete {
        /// 跳过确认
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}
