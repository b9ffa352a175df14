use crate::cli::{AccountCommand, FileCommand, FolderCommand, KeyCommand, MemberCommand, OwnerCommand, ReplCommand};
use crate::errors::CliError;
use crate::handlers;
use crate::repl::state::{AppState, lock_ledger};
use crate::ui::printer;

/// REPL 命令处理器
pub fn handle_repl_command(command: ReplCommand, app_state: &mut AppState) -> Result<(), CliError> {
    // Exit 会使 active_ledger 变为 None，从而自然地终止 run_repl 中的 while let 循环。
    let Some(ledger_arc) = app_state.active_ledger.clone() else {
        return Err(CliError::LedgerNotOpen);
    };
    let identity = app_state.identity;

    match command {
        ReplCommand::As { address } => {
            handlers::identity::handle_as(app_state, address);
        }
        ReplCommand::Whoami => {
            let ledger = lock_ledger(&ledger_arc)?;
            handlers::identity::handle_whoami(&ledger, &identity)?;
        }
        ReplCommand::Status => {
            let ledger = lock_ledger(&ledger_arc)?;
            let status = handlers::status::handle_status(&ledger, &identity)?;
            printer::print_status(&status);
        }
        ReplCommand::Owner(owner_command) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            match owner_command {
                OwnerCommand::Show => handlers::owner::handle_owner_show(&ledger)?,
                OwnerCommand::Set { new_owner } => {
                    handlers::owner::handle_owner_set(&mut ledger, &identity, &new_owner)?
                }
            }
        }
        ReplCommand::Key(key_command) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            match key_command {
                KeyCommand::Register { public_key } => {
                    handlers::key::handle_key_register(&mut ledger, &identity, &public_key)?;
                }
                KeyCommand::Show { addresses } => {
                    let keys = handlers::key::handle_key_show(&ledger, &identity, &addresses)?;
                    printer::print_encryption_keys(&keys);
                }
            }
        }
        ReplCommand::Folder(folder_command) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            match folder_command {
                FolderCommand::Create { name, members, keys } => {
                    handlers::folder::handle_folder_create(&mut ledger, &identity, &name, &members, &keys)?;
                }
                FolderCommand::Delete { id, yes } => {
                    handlers::folder::handle_folder_delete(&mut ledger, &identity, id, yes)?;
                }
                FolderCommand::Leave { id } => {
                    handlers::folder::handle_folder_leave(&mut ledger, &identity, id)?;
                }
                FolderCommand::Rotate { id, keys } => {
                    handlers::folder::handle_folder_rotate(&mut ledger, &identity, id, &keys)?;
                }
                FolderCommand::Info { id } => {
                    let details = handlers::folder::handle_folder_info(&ledger, &identity, id)?;
                    printer::print_folder_details(&details);
                }
                FolderCommand::List => {
                    let listing = handlers::folder::handle_folder_list(&ledger, &identity)?;
                    printer::print_folder_listing(&listing);
                }
            }
        }
        ReplCommand::Member(member_command) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            match member_command {
                MemberCommand::Add { folder, address, key } => {
                    handlers::member::handle_member_add(&mut ledger, &identity, folder, &address, &key)?;
                }
                MemberCommand::Remove { folder, address } => {
                    handlers::member::handle_member_remove(&mut ledger, &identity, folder, &address)?;
                }
                MemberCommand::Perms { folder, address, permissions } => {
                    handlers::member::handle_member_perms(&mut ledger, &identity, folder, &address, permissions)?;
                }
                MemberCommand::List { folder } => {
                    let (owner, members) = handlers::member::handle_member_list(&ledger, folder)?;
                    printer::print_member_list(&owner, &members);
                }
            }
        }
        ReplCommand::File(file_command) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            match file_command {
                FileCommand::Upload { name, cid, folder } => {
                    handlers::file::handle_file_upload(&mut ledger, &identity, &name, &cid, folder)?;
                }
                FileCommand::Rm { id, folder } => {
                    handlers::file::handle_file_remove(&mut ledger, &identity, id, folder)?;
                }
                FileCommand::Ls { folder } => {
                    let listing = handlers::file::handle_file_list(&ledger, &identity, folder)?;
                    printer::print_file_listing(&listing);
                }
            }
        }
        ReplCommand::Account(AccountCommand::Delete { yes }) => {
            let mut ledger = lock_ledger(&ledger_arc)?;
            let deletion = handlers::account::handle_account_delete(&mut ledger, &identity, yes)?;
            printer::print_account_deletion(&identity, &deletion);
        }
        ReplCommand::Exit => {
            if let Some(ledger_arc) = app_state.active_ledger.take() {
                let ledger_name = lock_ledger(&ledger_arc)?.config.name.clone();
                println!("Closing ledger '{}'. Goodbye!", ledger_name);
            }
        }
    }
    Ok(())
}
