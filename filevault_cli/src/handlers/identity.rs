use filevault::common::address::Address;
use filevault::ledger::Ledger;
use crate::errors::CliError;
use crate::repl::state::AppState;

/// 切换当前身份。身份只存在于会话中，账本本身不做任何认证。
pub fn handle_as(app_state: &mut AppState, address: Address) {
    app_state.identity = address;
    println!("Now acting as {}.", address);
}

pub fn handle_whoami(ledger: &Ledger, identity: &Address) -> Result<(), CliError> {
    println!("{}", identity);
    if ledger.contract_owner()? == *identity {
        println!("(contract owner)");
    }
    Ok(())
}
