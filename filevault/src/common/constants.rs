/// The current version of the ledger configuration file format.
pub const CURRENT_LEDGER_VERSION: u32 = 1;

/// Name of the configuration file inside a ledger directory.
pub const CONFIG_FILE_NAME: &str = "ledger.json";

/// Default name of the SQLite database inside a ledger directory.
pub const DATABASE_FILE_NAME: &str = "ledger.db";

/// Upper bound on the member list of a single folder.
pub const MAX_FOLDER_MEMBERS: usize = 255;

// --- 账本元数据键 ---
/// Metadata key holding the administrative (contract-level) owner address.
pub const META_CONTRACT_OWNER: &str = "_filevault_contract_owner";

/// Metadata key for the ledger creation timestamp (RFC 3339 format).
pub const META_LEDGER_CREATE_TIME: &str = "_filevault_create_time";

/// Metadata key for the ledger last update timestamp (RFC 3339 format).
pub const META_LEDGER_UPDATE_TIME: &str = "_filevault_update_time";
