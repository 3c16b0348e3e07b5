//! Record types and pure derivations.

mod dimensions;
mod record;

pub use dimensions::{calc_area, parse_decimal_prefix};
pub use record::{
    Coordinates, FACE_TYPES, Record, RecordId, RecordPatch, STATUS_TYPES, STRUCTURE_TYPES,
    TECHNOLOGY_TYPES, map_url_for, mask_account, saved_at_now,
};
