pub mod account;
pub mod file;
pub mod folder;
pub mod identity;
pub mod key;
pub mod member;
pub mod owner;
pub mod status;
