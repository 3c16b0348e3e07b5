//! `list`, `edit` and `delete` commands over stored records.

use clap::Args;

use crate::config::GeocampoConfig;
use crate::models::{calc_area, mask_account, RecordId, RecordPatch};
use crate::Result;

/// Runs the `list` command, printing one line per record, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be opened.
pub fn cmd_list(config: &GeocampoConfig) -> Result<()> {
    let store = super::open_store(config)?;
    if store.is_empty() {
        println!("No records.");
        return Ok(());
    }
    for record in store.records() {
        let photo = if record.photo_uri.is_empty() {
            "no photo"
        } else {
            "photo"
        };
        println!(
            "{}  {:10}  ({:.6}, {:.6})  {}  {}  [{}]",
            record.id,
            record.structure_type,
            record.coordinates.latitude,
            record.coordinates.longitude,
            record.status,
            record.saved_at,
            photo,
        );
    }
    println!("{} record(s)", store.len());
    Ok(())
}

/// Arguments for the `edit` command. Only supplied flags change; the area is
/// re-derived here from the resulting width and height.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the record to edit.
    pub id: String,

    /// New account code; masked before storage.
    #[arg(long)]
    pub cuenta: Option<String>,

    /// New external identifier.
    #[arg(long)]
    pub field_id: Option<String>,

    /// New structure type.
    #[arg(long)]
    pub structure_type: Option<String>,

    /// New technology.
    #[arg(long)]
    pub technology: Option<String>,

    /// New face count.
    #[arg(long)]
    pub faces: Option<String>,

    /// New status.
    #[arg(long)]
    pub status: Option<String>,

    /// New width text.
    #[arg(long)]
    pub width: Option<String>,

    /// New height text.
    #[arg(long)]
    pub height: Option<String>,
}

/// Runs the `edit` command.
///
/// # Errors
///
/// Returns an error if the record does not exist or the store write fails.
pub fn cmd_edit(config: &GeocampoConfig, args: EditArgs) -> Result<()> {
    let mut store = super::open_store(config)?;
    let id = RecordId::new(args.id);
    let Some(current) = store.get(&id) else {
        return Err(crate::Error::InvalidInput(format!(
            "no record with id {id}"
        )));
    };

    // Area is derived from the final width/height pair, whichever side the
    // edit touched.
    let width = args.width.clone().unwrap_or_else(|| current.dim_width.clone());
    let height = args
        .height
        .clone()
        .unwrap_or_else(|| current.dim_height.clone());
    let area = calc_area(&width, &height);

    store.update(
        &id,
        RecordPatch {
            cuenta: args.cuenta.map(|c| mask_account(&c)),
            field_id: args.field_id,
            structure_type: args.structure_type,
            technology: args.technology,
            faces: args.faces,
            status: args.status,
            dim_width: args.width,
            dim_height: args.height,
            area: Some(area),
            ..RecordPatch::default()
        },
    )?;
    println!("Updated record {id}");
    Ok(())
}

/// Runs the `delete` command. Asks for confirmation unless `yes` is set.
///
/// # Errors
///
/// Returns an error if the store write or the photo removal fails.
pub fn cmd_delete(config: &GeocampoConfig, id: &str, yes: bool) -> Result<()> {
    let mut store = super::open_store(config)?;
    let id = RecordId::new(id);
    if store.get(&id).is_none() {
        println!("No record with id {id}.");
        return Ok(());
    }
    if !yes && !super::ask_yes_no(&format!("Delete record {id}? This cannot be undone.")) {
        println!("Cancelled.");
        return Ok(());
    }
    store.delete(&id)?;
    println!("Deleted record {id}");
    Ok(())
}
