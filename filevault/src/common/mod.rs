pub mod address;
pub mod constants;
pub mod key;
pub mod permissions;
