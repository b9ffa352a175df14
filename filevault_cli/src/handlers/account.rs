use filevault::common::address::Address;
use filevault::ledger::{AccountDeletion, Ledger};
use crate::errors::CliError;
use crate::ui::prompt::confirm_action;

/// 删除当前身份的全部数据 (个人文件、拥有的文件夹、成员身份、公钥)。
pub fn handle_account_delete(ledger: &mut Ledger, caller: &Address, yes: bool) -> Result<AccountDeletion, CliError> {
    if !yes {
        let owned = ledger.owned_folder_ids(caller)?.len();
        let prompt = format!(
            "Delete all data of {}, including {} owned folder(s)?",
            caller, owned
        );
        if !confirm_action(&prompt)? {
            return Err(CliError::ConfirmationFailed);
        }
    }
    Ok(ledger.delete_account(caller)?)
}
