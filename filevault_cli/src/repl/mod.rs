pub mod dispatcher;
pub mod state;

use crate::cli::ReplCommand;
use crate::errors::CliError;
use crate::repl::dispatcher::handle_repl_command;
use crate::repl::state::{AppState, lock_ledger};
use crate::ui::formatter::short_address;
use clap::Parser;
use log::debug;
use rustyline::DefaultEditor;

pub fn run_repl(app_state: &mut AppState) -> Result<(), CliError> {
    let mut rl = DefaultEditor::new()?;

    while let Some(ledger_arc) = &app_state.active_ledger {
        let ledger_name = lock_ledger(ledger_arc)?.config.name.clone();
        let prompt = format!("filevault[{}@{}]> ", short_address(&app_state.identity), ledger_name);

        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = shlex::split(line.as_str()).unwrap_or_default();
                if args.is_empty() {
                    continue;
                }

                match ReplCommand::try_parse_from(args) {
                    Ok(command) => {
                        debug!("REPL command: {:?}", command);
                        if let Err(e) = handle_repl_command(command, app_state) {
                            eprintln!("Error: {}", e);
                        }
                    }
                    Err(e) => {
                        e.print()?;
                    }
                }
            }
            Err(_) => {
                if let Some(ledger_arc) = app_state.active_ledger.take() {
                    let ledger_name = lock_ledger(&ledger_arc)?.config.name.clone();
                    println!("\nClosing ledger '{}'. Goodbye!", ledger_name);
                }
                break;
            }
        }
    }
    Ok(())
}
