//! The inventory record and its identifier.
//!
//! Field names serialize in camelCase so durable documents and CSV headers
//! stay compatible with datasets produced by earlier releases.

use crate::{Error, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended structure type vocabulary. Open: imported values outside this
/// list are accepted verbatim.
pub const STRUCTURE_TYPES: &[&str] = &[
    "Valla",
    "Rótulo",
    "Mupi",
    "Cruza Calle",
    "Banner",
    "Pendón",
    "Pantalla",
];

/// Recommended technology vocabulary.
pub const TECHNOLOGY_TYPES: &[&str] = &["LED", "Luminoso", "Normal"];

/// Recommended face-count vocabulary.
pub const FACE_TYPES: &[&str] = &["Una Cara", "Doble Cara"];

/// Recommended qualification status vocabulary.
pub const STATUS_TYPES: &[&str] = &["Calificada", "Sin Calificar", "Sin Proceso"];

/// Unique identifier for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh ID from the current time in milliseconds.
    ///
    /// Collision avoidance only; two IDs generated in the same millisecond
    /// collide, which the single-actor usage model tolerates.
    #[must_use]
    pub fn generate() -> Self {
        Self(crate::current_timestamp_millis().to_string())
    }

    /// Generates a fresh ID for an imported row that carried none.
    ///
    /// Combines the current time with the 1-based data row index so every row
    /// of one import gets a distinct ID.
    #[must_use]
    pub fn generate_for_row(row: usize) -> Self {
        Self(format!("{}_{row}", crate::current_timestamp_millis()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A latitude/longitude pair. Always finite once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting non-finite components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either component is NaN or infinite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::InvalidInput(format!(
                "coordinates must be finite, got ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// One inventoried structure observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Opaque unique identifier, stable for the record's lifetime.
    pub id: RecordId,
    /// Reference to a locally stored photo. Empty for records imported from
    /// CSV until a photo is attached.
    #[serde(default)]
    pub photo_uri: String,
    /// Capture location.
    pub coordinates: Coordinates,
    /// Human-shareable map URL derived from the coordinates.
    #[serde(default)]
    pub map_url: String,
    /// Locale-formatted capture timestamp. Opaque display text once set.
    #[serde(default)]
    pub saved_at: String,
    /// Masked account code (`NNNN-NNNN`).
    #[serde(default)]
    pub cuenta: String,
    /// Free-text external identifier.
    #[serde(default)]
    pub field_id: String,
    /// Structure type. Open string; see [`STRUCTURE_TYPES`].
    #[serde(default)]
    pub structure_type: String,
    /// Lighting technology. Open string; see [`TECHNOLOGY_TYPES`].
    #[serde(default)]
    pub technology: String,
    /// Face count. Open string; see [`FACE_TYPES`].
    #[serde(default)]
    pub faces: String,
    /// Qualification status. Open string; see [`STATUS_TYPES`].
    #[serde(default)]
    pub status: String,
    /// Width as the user typed it, locale separators preserved.
    #[serde(default)]
    pub dim_width: String,
    /// Height as the user typed it, locale separators preserved.
    #[serde(default)]
    pub dim_height: String,
    /// Derived width×height in square meters, two decimals. `None` when a
    /// dimension is missing or not a positive number.
    #[serde(default)]
    pub area: Option<String>,
}

/// Partial field replacement for [`Record`] edits.
///
/// `None` fields are left untouched; the edit operation supplies the area it
/// derived, the store never recomputes it.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// New photo reference.
    pub photo_uri: Option<String>,
    /// New account code (already masked by the caller).
    pub cuenta: Option<String>,
    /// New external identifier.
    pub field_id: Option<String>,
    /// New structure type.
    pub structure_type: Option<String>,
    /// New technology.
    pub technology: Option<String>,
    /// New face count.
    pub faces: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New width text.
    pub dim_width: Option<String>,
    /// New height text.
    pub dim_height: Option<String>,
    /// New derived area (outer `None` = keep, inner `None` = clear).
    pub area: Option<Option<String>>,
}

impl RecordPatch {
    /// Applies the patch over an existing record, shallow-merge semantics.
    pub fn apply(self, record: &mut Record) {
        if let Some(v) = self.photo_uri {
            record.photo_uri = v;
        }
        if let Some(v) = self.cuenta {
            record.cuenta = v;
        }
        if let Some(v) = self.field_id {
            record.field_id = v;
        }
        if let Some(v) = self.structure_type {
            record.structure_type = v;
        }
        if let Some(v) = self.technology {
            record.technology = v;
        }
        if let Some(v) = self.faces {
            record.faces = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.dim_width {
            record.dim_width = v;
        }
        if let Some(v) = self.dim_height {
            record.dim_height = v;
        }
        if let Some(v) = self.area {
            record.area = v;
        }
    }
}

/// Derives the shareable map URL for a coordinate pair, six decimal places.
#[must_use]
pub fn map_url_for(coordinates: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={:.6},{:.6}",
        coordinates.latitude, coordinates.longitude
    )
}

/// Formats the current local time the way fresh captures are stamped
/// (`D/M/YYYY, HH:MM:SS`, no zero padding on day or month).
#[must_use]
pub fn saved_at_now() -> String {
    Local::now().format("%-d/%-m/%Y, %H:%M:%S").to_string()
}

/// Applies the account-code mask: digits only, at most eight, a dash after
/// the fourth digit once a fifth is present.
#[must_use]
pub fn mask_account(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    if digits.len() <= 4 {
        digits
    } else {
        format!("{}-{}", &digits[..4], &digits[4..])
    }
}
