use filevault::common::address::Address;
use filevault::ledger::Ledger;
use crate::errors::CliError;

pub fn handle_key_register(ledger: &mut Ledger, caller: &Address, public_key: &str) -> Result<(), CliError> {
    ledger.register_encryption_key(caller, public_key)?;
    println!("Encryption key registered for {}.", caller);
    Ok(())
}

/// 查询一组地址的公钥；未指定地址时查询当前身份。
pub fn handle_key_show(
    ledger: &Ledger,
    identity: &Address,
    addresses: &[Address],
) -> Result<Vec<(Address, Option<String>)>, CliError> {
    let addresses = if addresses.is_empty() {
        vec![*identity]
    } else {
        addresses.to_vec()
    };
    let keys = ledger.encryption_keys(&addresses)?;
    Ok(addresses.into_iter().zip(keys).collect())
}
