use std::fmt;
use std::str::FromStr;
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A folder key wrapped for one member's public key.
///
/// The ledger never looks inside the blob: it only stores it next to the member
/// it belongs to and hands it back on request. Hex (with an optional `0x`
/// prefix) is used whenever it has to travel as text.
//
// // 为某个成员包装过的文件夹密钥。对账本而言是不透明的字节串。
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct WrappedKey(Vec<u8>);

impl WrappedKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        Ok(Self(hex::decode(digits)?))
    }
}

/// Debug 只打印长度和前缀，避免在日志中输出整个密钥块
impl fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = hex::encode(&self.0).chars().take(8).collect();
        write!(f, "WrappedKey({} bytes, 0x{}…)", self.0.len(), preview)
    }
}

impl fmt::Display for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for WrappedKey {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for WrappedKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WrappedKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WrappedKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// 以 BLOB 形式存储原始字节
impl ToSql for WrappedKey {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_slice()))
    }
}

impl FromSql for WrappedKey {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_blob().map(|bytes| WrappedKey(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_with_and_without_prefix() {
        let a = WrappedKey::from_hex("0xdeadbeef").unwrap();
        let b = WrappedKey::from_hex("DEADBEEF").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(a.to_string(), "0xdeadbeef");
        assert!(WrappedKey::from_hex("0xabc").is_err());
    }

    #[test]
    fn test_debug_does_not_dump_blob() {
        let key = WrappedKey::new(vec![0x11; 64]);
        let debug = format!("{:?}", key);
        assert!(debug.starts_with("WrappedKey(64 bytes"));
        assert!(debug.len() < 40);
    }

    #[test]
    fn test_empty_blob_survives_sqlite() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let loaded: WrappedKey = conn
            .query_row("SELECT ?1", [&WrappedKey::default()], |row| row.get(0))
            .unwrap();
        assert!(loaded.is_empty());
    }
}
