//! `capture` command: save a new field observation.

use clap::Args;

use crate::capture::{CaptureRequest, CaptureService};
use crate::config::GeocampoConfig;
use crate::photos::DirPhotoStore;
use crate::Result;

/// Arguments for the `capture` command.
#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// GPS latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// GPS longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Path to a photo to copy into permanent storage.
    #[arg(long)]
    pub photo: Option<String>,

    /// Account code; masked to `NNNN-NNNN` before storage.
    #[arg(long, default_value = "")]
    pub cuenta: String,

    /// External identifier.
    #[arg(long, default_value = "")]
    pub field_id: String,

    /// Structure type (e.g. `Valla`, `Mupi`).
    #[arg(long, default_value = "")]
    pub structure_type: String,

    /// Lighting technology (e.g. `LED`).
    #[arg(long, default_value = "")]
    pub technology: String,

    /// Face count (e.g. `Una Cara`).
    #[arg(long, default_value = "")]
    pub faces: String,

    /// Qualification status (e.g. `Calificada`).
    #[arg(long, default_value = "")]
    pub status: String,

    /// Width text; used together with height to derive the area.
    #[arg(long, default_value = "")]
    pub width: String,

    /// Height text.
    #[arg(long, default_value = "")]
    pub height: String,
}

/// Runs the `capture` command.
///
/// # Errors
///
/// Returns an error for invalid coordinates, a failed photo copy or a failed
/// store write.
pub fn cmd_capture(config: &GeocampoConfig, args: CaptureArgs) -> Result<()> {
    let mut store = super::open_store(config)?;
    let service = CaptureService::new(Box::new(DirPhotoStore::with_create(
        config.photos_dir(),
    )?));

    let id = service.capture(
        &mut store,
        CaptureRequest {
            photo_source: args.photo.unwrap_or_default(),
            latitude: args.lat,
            longitude: args.lon,
            cuenta: args.cuenta,
            field_id: args.field_id,
            structure_type: args.structure_type,
            technology: args.technology,
            faces: args.faces,
            status: args.status,
            dim_width: args.width,
            dim_height: args.height,
        },
    )?;

    let record = store
        .get(&id)
        .ok_or_else(|| crate::Error::OperationFailed {
            operation: "capture".to_string(),
            cause: "saved record not found".to_string(),
        })?;
    println!("Saved record {id}");
    println!("  map: {}", record.map_url);
    if let Some(area) = &record.area {
        println!("  area: {area} m²");
    }
    Ok(())
}
