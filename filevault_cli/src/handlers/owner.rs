use filevault::common::address::Address;
use filevault::ledger::Ledger;
use crate::errors::CliError;

pub fn handle_owner_show(ledger: &Ledger) -> Result<(), CliError> {
    println!("Contract owner: {}", ledger.contract_owner()?);
    Ok(())
}

/// 转移管理员角色；之后当前身份可能不再是管理员。
pub fn handle_owner_set(ledger: &mut Ledger, caller: &Address, new_owner: &Address) -> Result<(), CliError> {
    ledger.set_owner(caller, new_owner)?;
    println!("Contract owner changed from {} to {}.", caller, new_owner);
    Ok(())
}
