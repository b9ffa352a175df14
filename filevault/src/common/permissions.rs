use std::fmt;
use std::str::FromStr;
use bitflags::bitflags;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

bitflags! {
    /// The set of flags a folder member may hold.
    ///
    /// The bit positions are fixed and shared with every client of the ledger.
    /// Folder owners never appear in this set; ownership is checked separately.
    //
    // // 文件夹成员权限的标志集合。位的位置是固定的协议约定。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Permissions: u8 {
        /// May add and remove members, rotate the folder key and change permissions.
        const MANAGE_PERMISSIONS = 1 << 0;
        /// May upload files into the folder.
        const UPLOAD = 1 << 1;
        /// May delete files from the folder.
        const DELETE = 1 << 2;
    }
}

/// Errors that can occur while building `Permissions` from raw input.
#[derive(Debug, thiserror::Error)]
pub enum PermissionsParseError {
    #[error("Unknown permission bits in mask {0:#010b}")]
    UnknownBits(u8),
    #[error("Unknown permission flag '{0}' (expected manage, upload or delete)")]
    UnknownFlag(String),
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

impl Permissions {
    /// 用户可见的标志名称，按位顺序排列。
    const FLAG_NAMES: [(Permissions, &'static str); 3] = [
        (Self::MANAGE_PERMISSIONS, "manage"),
        (Self::UPLOAD, "upload"),
        (Self::DELETE, "delete"),
    ];

    /// A member holding `MANAGE_PERMISSIONS` is a manager.
    pub const fn is_manager(&self) -> bool {
        self.contains(Self::MANAGE_PERMISSIONS)
    }

    /// Like `from_bits`, but reports which mask was rejected.
    pub fn try_from_bits(bits: u8) -> Result<Self, PermissionsParseError> {
        Permissions::from_bits(bits).ok_or(PermissionsParseError::UnknownBits(bits))
    }

    /// Names of the flags that are set, in bit order.
    pub fn flag_names(&self) -> Vec<&'static str> {
        Self::FLAG_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Parses a single flag name (`manage`, `upload`, `delete`), case-insensitively.
    pub fn from_flag_name(name: &str) -> Result<Self, PermissionsParseError> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::FLAG_NAMES
            .iter()
            .find(|(_, flag_name)| *flag_name == wanted)
            .map(|(flag, _)| *flag)
            .ok_or_else(|| PermissionsParseError::UnknownFlag(name.to_string()))
    }
}

/// 显示为 `manage|upload` 形式，空集显示为 `none`
impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.flag_names().join("|"))
    }
}

/// Accepts either a flag list (`manage|upload`, `upload,delete`, `none`)
/// or a raw numeric mask (`5`, `0b101`).
impl FromStr for Permissions {
    type Err = PermissionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Permissions::empty());
        }
        if let Some(binary) = trimmed.strip_prefix("0b") {
            return u8::from_str_radix(binary, 2)
                .map_err(|_| PermissionsParseError::UnknownFlag(s.to_string()))
                .and_then(Permissions::try_from_bits);
        }
        if let Ok(bits) = trimmed.parse::<u8>() {
            return Permissions::try_from_bits(bits);
        }

        let mut permissions = Permissions::empty();
        for name in trimmed.split(['|', ',']) {
            permissions.insert(Permissions::from_flag_name(name)?);
        }
        Ok(permissions)
    }
}

/// 以 INTEGER 形式存储原始位掩码
impl ToSql for Permissions {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.bits())))
    }
}

impl FromSql for Permissions {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_i64()?;
        let bits = u8::try_from(raw).map_err(|_| FromSqlError::OutOfRange(raw))?;
        Permissions::try_from_bits(bits).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
