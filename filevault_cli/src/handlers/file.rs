use filevault::common::address::Address;
use filevault::ledger::{FileId, FolderFileEntry, FolderId, Ledger, PersonalFileEntry};
use crate::errors::CliError;
use crate::ui::printer::print_released_cids;

/// Result of `file ls`: either one folder or the caller's personal space.
pub enum FileListing {
    Folder(FolderId, Vec<FolderFileEntry>),
    Personal(Vec<PersonalFileEntry>),
}

pub fn handle_file_upload(
    ledger: &mut Ledger,
    caller: &Address,
    name: &str,
    cid: &str,
    folder: Option<FolderId>,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidName("File name cannot be empty.".to_string()));
    }
    match folder {
        Some(folder_id) => {
            let id = ledger.upload_file(caller, folder_id, name, cid)?;
            println!("Recorded '{}' in folder {} as file {}.", name, folder_id, id);
        }
        None => {
            let id = ledger.upload_personal_file(caller, name, cid)?;
            println!("Recorded '{}' as personal file {}.", name, id);
        }
    }
    Ok(())
}

pub fn handle_file_remove(
    ledger: &mut Ledger,
    caller: &Address,
    id: FileId,
    folder: Option<FolderId>,
) -> Result<(), CliError> {
    let (name, cid) = match folder {
        Some(folder_id) => {
            let entry = ledger.delete_file(caller, folder_id, id)?;
            (entry.name, entry.cid)
        }
        None => {
            let entry = ledger.delete_personal_file(caller, id)?;
            (entry.name, entry.cid)
        }
    };
    println!("Deleted file {} ('{}').", id, name);
    print_released_cids(std::iter::once(cid.as_str()));
    Ok(())
}

pub fn handle_file_list(ledger: &Ledger, identity: &Address, folder: Option<FolderId>) -> Result<FileListing, CliError> {
    Ok(match folder {
        Some(folder_id) => FileListing::Folder(folder_id, ledger.folder_files(folder_id)?),
        None => FileListing::Personal(ledger.personal_files(identity)?),
    })
}
