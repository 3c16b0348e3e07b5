//! Capture service.
//!
//! Turns a finished capture (photo on transient storage, GPS fix, metadata
//! entered in the field) into a stored record: the photo is copied to
//! permanent storage, the map URL and timestamp are stamped, the account
//! code is masked and the area derived, and the record is prepended to the
//! store.

use crate::models::{
    Coordinates, Record, RecordId, RecordPatch, calc_area, map_url_for, mask_account,
    saved_at_now,
};
use crate::photos::PhotoStore;
use crate::store::RecordStore;
use crate::Result;

/// A finished field capture ready to be saved.
#[derive(Debug, Clone, Default)]
pub struct CaptureRequest {
    /// Transient photo location from the camera. Empty when there is no
    /// photo (not offered by the capture flow, but tolerated).
    pub photo_source: String,
    /// GPS latitude.
    pub latitude: f64,
    /// GPS longitude.
    pub longitude: f64,
    /// Account code, masked here before storage.
    pub cuenta: String,
    /// External identifier.
    pub field_id: String,
    /// Structure type.
    pub structure_type: String,
    /// Technology.
    pub technology: String,
    /// Face count.
    pub faces: String,
    /// Qualification status.
    pub status: String,
    /// Width text.
    pub dim_width: String,
    /// Height text.
    pub dim_height: String,
}

/// Service that builds and stores records from captures.
pub struct CaptureService {
    photos: Box<dyn PhotoStore>,
}

impl CaptureService {
    /// Creates a capture service around a photo collaborator.
    #[must_use]
    pub fn new(photos: Box<dyn PhotoStore>) -> Self {
        Self { photos }
    }

    /// Saves a capture as a new record, newest first.
    ///
    /// Derived fields are computed here, at the construction boundary: map
    /// URL from the coordinates, the capture timestamp, the masked account
    /// code and the area from the dimension texts.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite coordinates, a failed photo copy or a
    /// failed store write.
    pub fn capture(&self, store: &mut RecordStore, request: CaptureRequest) -> Result<RecordId> {
        let coordinates = Coordinates::new(request.latitude, request.longitude)?;
        let photo_uri = if request.photo_source.is_empty() {
            String::new()
        } else {
            self.photos.persist(&request.photo_source)?
        };

        let record = Record {
            id: RecordId::generate(),
            photo_uri,
            coordinates,
            map_url: map_url_for(coordinates),
            saved_at: saved_at_now(),
            cuenta: mask_account(&request.cuenta),
            field_id: request.field_id,
            structure_type: request.structure_type,
            technology: request.technology,
            faces: request.faces,
            status: request.status,
            area: calc_area(&request.dim_width, &request.dim_height),
            dim_width: request.dim_width,
            dim_height: request.dim_height,
        };
        let id = record.id.clone();
        store.create(record)?;
        Ok(id)
    }

    /// Attaches a photo to a record that has none (records imported from CSV
    /// carry no photo until one is taken later).
    ///
    /// # Errors
    ///
    /// Returns an error if the photo copy or the store write fails.
    pub fn attach_photo(
        &self,
        store: &mut RecordStore,
        id: &RecordId,
        photo_source: &str,
    ) -> Result<()> {
        let photo_uri = self.photos.persist(photo_source)?;
        store.update(
            id,
            RecordPatch {
                photo_uri: Some(photo_uri),
                ..RecordPatch::default()
            },
        )
    }
}
