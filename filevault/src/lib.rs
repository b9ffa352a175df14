pub mod common;
pub mod ledger;
pub mod utils;
