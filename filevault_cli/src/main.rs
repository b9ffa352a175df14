mod cli;
pub mod errors;
mod handlers;
mod repl;
mod ui;

use crate::cli::{Cli, TopLevelCommands};
use crate::errors::CliError;
use crate::repl::run_repl;
use crate::repl::state::AppState;
use clap::Parser;
use filevault::common::address::Address;
use filevault::ledger::Ledger;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

fn main() -> Result<(), CliError> {
    env_logger::init();
    let cli = Cli::parse();

    let ledger_result: Result<Ledger, CliError> = match cli.command {
        TopLevelCommands::Create { path, owner } => {
            let parent_path = match path {
                Some(p) => p,
                None => env::current_dir()?,
            };
            println!("Ledger will be created in parent directory: {:?}", parent_path);

            print!("Please enter a name for the new ledger: ");
            io::stdout().flush()?;
            let mut ledger_name = String::new();
            io::stdin().read_line(&mut ledger_name)?;
            let ledger_name = ledger_name.trim();
            if ledger_name.is_empty() {
                return Err(CliError::InvalidName("Ledger name cannot be empty.".to_string()));
            }
            let final_ledger_path = parent_path.join(ledger_name);
            handle_create_command(&final_ledger_path, ledger_name, &owner)
        }
        TopLevelCommands::Open { path } => {
            let effective_path = match path {
                Some(p) => p,
                None => env::current_dir()?,
            };
            println!("Opening ledger at: {:?}", effective_path);
            Ledger::open_ledger(&effective_path).map_err(CliError::from)
        }
    };

    match ledger_result {
        Ok(ledger) => {
            // 初始身份为合约所有者
            let identity = ledger.contract_owner()?;
            println!(
                "Ledger '{}' is now open. Acting as {}.",
                ledger.config.name, identity
            );
            println!("Type 'help' for commands or 'exit' to quit.");
            let mut app_state = AppState {
                active_ledger: Some(Arc::new(Mutex::new(ledger))),
                identity,
            };
            run_repl(&mut app_state)?;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
    Ok(())
}

fn handle_create_command(path: &Path, ledger_name: &str, owner: &Address) -> Result<Ledger, CliError> {
    let ledger = Ledger::create_ledger(path, ledger_name, owner)?;
    println!("Created ledger '{}' with contract owner {}.", ledger_name, owner);
    Ok(ledger)
}
