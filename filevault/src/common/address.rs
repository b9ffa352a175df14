use std::fmt;
use std::str::FromStr;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 20-byte account identifier, as handed to the ledger by an external wallet.
///
/// Parsing accepts 40 hex characters with or without a `0x` prefix, in any case.
/// Display always produces the canonical lowercase `0x`-prefixed form, which is
/// also the form stored in the database.
//
// // 一个 20 字节的账户标识符。显示与存储时统一使用小写的 `0x` 前缀格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

/// Errors that can occur while parsing an `Address` string.
#[derive(Debug, thiserror::Error)]
pub enum AddressParseError {
    #[error("Invalid address length: expected 40 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Address {
    /// 不含 `0x` 前缀的十六进制字符串长度。
    pub const HEX_LEN: usize = 40;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Encodes the address as lowercase hex with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses a hex address, with or without a `0x`/`0X` prefix.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != Self::HEX_LEN {
            return Err(AddressParseError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// --- Serde (JSON) ---

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressVisitor;

        impl<'de> serde::de::Visitor<'de> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 40-character hex address string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Address::from_str(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}

// --- rusqlite ---

/// 存储到数据库时，编码为 TEXT (小写十六进制)
impl ToSql for Address {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Text(self.to_hex())))
    }
}

impl FromSql for Address {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|s| Address::from_str(s).map_err(|e| FromSqlError::Other(Box::new(e))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_prefix_and_mixed_case() {
        let lower = Address::from_str("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        let upper = Address::from_str("0X5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap();
        let bare = Address::from_str("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower, bare);
        assert_eq!(bare.to_string(), "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Address::from_str("0x1234"),
            Err(AddressParseError::InvalidLength(4))
        ));
        assert!(matches!(
            Address::from_str("0xzzzzb6053f3e94c9b9a09f33669435e7ef1beaed"),
            Err(AddressParseError::Hex(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let address = Address::new([0xab; 20]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(20)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_rusqlite_stores_canonical_text() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let address = Address::from_str("0xAbCdEf0000000000000000000000000000000001").unwrap();

        let stored: String = conn
            .query_row("SELECT ?1", [&address], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, "0xabcdef0000000000000000000000000000000001");

        let loaded: Address = conn
            .query_row("SELECT ?1", [&stored], |row| row.get(0))
            .unwrap();
        assert_eq!(loaded, address);
    }
}
