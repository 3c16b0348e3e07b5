//! CSV codec for the record collection.
//!
//! Encoding writes a fixed header row followed by one CRLF-terminated row per
//! record; fields are quoted only when they contain a comma, a double quote
//! or a newline, with embedded quotes doubled. Decoding inverts that grammar
//! exactly, maps columns by header name (order-tolerant), and never fails:
//! malformed rows and rows without parseable coordinates are silently
//! dropped, so a wholly malformed file decodes to an empty set.

use crate::models::{
    Coordinates, Record, RecordId, map_url_for, parse_decimal_prefix, saved_at_now,
};
use crate::{Error, Result};

/// Canonical column order of the interchange format.
pub const CSV_HEADERS: [&str; 14] = [
    "id",
    "savedAt",
    "latitude",
    "longitude",
    "mapUrl",
    "cuenta",
    "fieldId",
    "structureType",
    "technology",
    "faces",
    "status",
    "dimWidth",
    "dimHeight",
    "area",
];

/// Encodes records as CSV text.
///
/// # Errors
///
/// Returns an error only if the in-memory writer fails, which indicates a
/// serialization bug rather than bad record data; every field value is
/// encodable.
pub fn encode(records: &[Record]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    let write_err = |e: csv::Error| Error::OperationFailed {
        operation: "encode_csv".to_string(),
        cause: e.to_string(),
    };

    writer.write_record(CSV_HEADERS).map_err(write_err)?;
    for record in records {
        let latitude = record.coordinates.latitude.to_string();
        let longitude = record.coordinates.longitude.to_string();
        writer
            .write_record([
                record.id.as_str(),
                record.saved_at.as_str(),
                latitude.as_str(),
                longitude.as_str(),
                record.map_url.as_str(),
                record.cuenta.as_str(),
                record.field_id.as_str(),
                record.structure_type.as_str(),
                record.technology.as_str(),
                record.faces.as_str(),
                record.status.as_str(),
                record.dim_width.as_str(),
                record.dim_height.as_str(),
                record.area.as_deref().unwrap_or(""),
            ])
            .map_err(write_err)?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::OperationFailed {
        operation: "encode_csv".to_string(),
        cause: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| Error::OperationFailed {
        operation: "encode_csv".to_string(),
        cause: e.to_string(),
    })
}

/// Column indices resolved from the header row by name.
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    saved_at: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    map_url: Option<usize>,
    cuenta: Option<usize>,
    field_id: Option<usize>,
    structure_type: Option<usize>,
    technology: Option<usize>,
    faces: Option<usize>,
    status: Option<usize>,
    dim_width: Option<usize>,
    dim_height: Option<usize>,
    area: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (i, header) in headers.iter().enumerate() {
            match header {
                "id" => map.id = Some(i),
                "savedAt" => map.saved_at = Some(i),
                "latitude" => map.latitude = Some(i),
                "longitude" => map.longitude = Some(i),
                "mapUrl" => map.map_url = Some(i),
                "cuenta" => map.cuenta = Some(i),
                "fieldId" => map.field_id = Some(i),
                "structureType" => map.structure_type = Some(i),
                "technology" => map.technology = Some(i),
                "faces" => map.faces = Some(i),
                "status" => map.status = Some(i),
                "dimWidth" => map.dim_width = Some(i),
                "dimHeight" => map.dim_height = Some(i),
                "area" => map.area = Some(i),
                _ => {}, // Ignore unknown columns
            }
        }
        map
    }
}

/// Decodes CSV text into candidate records.
///
/// Rows whose latitude or longitude do not parse to finite numbers are
/// dropped, not reported. Absent fields default to empty strings; an absent
/// or empty `id` gets a freshly generated one, `savedAt` defaults to the
/// capture timestamp format, `mapUrl` is regenerated from the coordinates,
/// and `area` stays absent rather than being computed.
#[must_use]
pub fn decode(text: &str) -> Vec<Record> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let Ok(headers) = reader.headers() else {
        return Vec::new();
    };
    let columns = ColumnMap::from_headers(headers);

    let mut result = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let Ok(row) = row else {
            // Malformed row, silent skip.
            continue;
        };
        if let Some(record) = decode_row(&row, &columns, index + 1) {
            result.push(record);
        }
    }
    result
}

fn decode_row(row: &csv::StringRecord, columns: &ColumnMap, index: usize) -> Option<Record> {
    let field = |idx: Option<usize>| -> &str { idx.and_then(|i| row.get(i)).unwrap_or("") };

    let latitude = parse_decimal_prefix(field(columns.latitude)).filter(|v| v.is_finite())?;
    let longitude = parse_decimal_prefix(field(columns.longitude)).filter(|v| v.is_finite())?;
    let coordinates = Coordinates {
        latitude,
        longitude,
    };

    let id = match field(columns.id) {
        "" => RecordId::generate_for_row(index),
        id => RecordId::new(id),
    };
    let map_url = match field(columns.map_url) {
        "" => map_url_for(coordinates),
        url => url.to_string(),
    };
    let saved_at = match field(columns.saved_at) {
        "" => saved_at_now(),
        ts => ts.to_string(),
    };
    // Re-imported areas are preserved as given, never recomputed, so
    // finalized values round-trip.
    let area = match field(columns.area) {
        "" => None,
        a => Some(a.to_string()),
    };

    Some(Record {
        id,
        photo_uri: String::new(),
        coordinates,
        map_url,
        saved_at,
        cuenta: field(columns.cuenta).to_string(),
        field_id: field(columns.field_id).to_string(),
        structure_type: field(columns.structure_type).to_string(),
        technology: field(columns.technology).to_string(),
        faces: field(columns.faces).to_string(),
        status: field(columns.status).to_string(),
        dim_width: field(columns.dim_width).to_string(),
        dim_height: field(columns.dim_height).to_string(),
        area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(id: &str) -> Record {
        Record {
            id: RecordId::new(id),
            photo_uri: String::new(),
            coordinates: Coordinates {
                latitude: 14.634915,
                longitude: -90.506882,
            },
            map_url: map_url_for(Coordinates {
                latitude: 14.634915,
                longitude: -90.506882,
            }),
            saved_at: "15/11/2023, 10:13:20".to_string(),
            cuenta: "1234-5678".to_string(),
            field_id: "A-17".to_string(),
            structure_type: "Valla".to_string(),
            technology: "LED".to_string(),
            faces: "Doble Cara".to_string(),
            status: "Calificada".to_string(),
            dim_width: "3".to_string(),
            dim_height: "4".to_string(),
            area: Some("12.00".to_string()),
        }
    }

    #[test]
    fn test_encode_header_row_and_crlf() {
        let text = encode(&[record("1")]).unwrap();
        let mut lines = text.split("\r\n");
        assert_eq!(
            lines.next().unwrap(),
            "id,savedAt,latitude,longitude,mapUrl,cuenta,fieldId,structureType,technology,faces,status,dimWidth,dimHeight,area"
        );
        let data = lines.next().unwrap();
        assert!(data.starts_with("1,"));
        assert!(data.contains("14.634915"));
    }

    #[test]
    fn test_encode_quotes_only_when_needed() {
        let mut r = record("1");
        r.field_id = "plain".to_string();
        r.structure_type = "has,comma".to_string();
        r.technology = "has \"quote\"".to_string();
        let text = encode(&[r]).unwrap();
        assert!(text.contains(",plain,"));
        assert!(text.contains("\"has,comma\""));
        assert!(text.contains("\"has \"\"quote\"\"\""));
    }

    #[test]
    fn test_round_trip_commas_quotes_newlines() {
        let mut r = record("77");
        r.field_id = "a,b".to_string();
        r.cuenta = "say \"hi\"".to_string();
        r.structure_type = "line1\nline2".to_string();
        r.area = None;

        let decoded = decode(&encode(std::slice::from_ref(&r)).unwrap());
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, r.id);
        assert_eq!(decoded[0].field_id, "a,b");
        assert_eq!(decoded[0].cuenta, "say \"hi\"");
        assert_eq!(decoded[0].structure_type, "line1\nline2");
        assert_eq!(decoded[0].area, None);
        assert_eq!(decoded[0].coordinates, r.coordinates);
    }

    #[test]
    fn test_decode_drops_rows_with_bad_coordinates() {
        let text = "id,savedAt,latitude,longitude\n1,t,not-a-number,1.0\n2,t,3.0,4.0\n";
        let decoded = decode(text);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id.as_str(), "2");
    }

    #[test]
    fn test_decode_header_only_is_empty() {
        assert!(decode("id,savedAt,latitude,longitude,mapUrl\n").is_empty());
        assert!(decode("").is_empty());
        assert!(decode("garbage without commas").is_empty());
    }

    #[test]
    fn test_decode_maps_columns_by_name_not_position() {
        let text = "longitude,latitude,id\n-90.5,14.6,abc\n";
        let decoded = decode(text);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].coordinates.latitude, 14.6);
        assert_eq!(decoded[0].coordinates.longitude, -90.5);
        assert_eq!(decoded[0].id.as_str(), "abc");
    }

    #[test]
    fn test_decode_applies_defaults() {
        let text = "latitude,longitude\n14.6,-90.5\n";
        let decoded = decode(text);
        assert_eq!(decoded.len(), 1);
        let r = &decoded[0];
        assert!(!r.id.as_str().is_empty());
        assert!(!r.saved_at.is_empty());
        assert_eq!(
            r.map_url,
            "https://www.google.com/maps/search/?api=1&query=14.600000,-90.500000"
        );
        assert_eq!(r.photo_uri, "");
        assert_eq!(r.area, None);
        assert_eq!(r.cuenta, "");
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let text = "id,latitude,longitude\r\n\r\n1,1.0,2.0\r\n\r\n";
        assert_eq!(decode(text).len(), 1);
    }

    #[test]
    fn test_decode_preserves_imported_area_verbatim() {
        // 99.99 is not 3×4; it must survive untouched.
        let text = "latitude,longitude,dimWidth,dimHeight,area\n1.0,2.0,3,4,99.99\n";
        let decoded = decode(text);
        assert_eq!(decoded[0].area.as_deref(), Some("99.99"));
    }

    // Field values without surrounding whitespace (both codec and the
    // original trim fields on decode, so edge whitespace never survives).
    fn field_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9,\"áéíóú_-]{0,12}"
            .prop_map(|s| s.trim().to_string())
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            cuenta in field_strategy(),
            field_id in field_strategy(),
            structure_type in field_strategy(),
            dim_width in field_strategy(),
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
        ) {
            let mut r = record("p1");
            r.cuenta = cuenta;
            r.field_id = field_id;
            r.structure_type = structure_type;
            r.dim_width = dim_width;
            r.coordinates = Coordinates { latitude: lat, longitude: lon };

            let decoded = decode(&encode(std::slice::from_ref(&r)).unwrap());
            prop_assert_eq!(decoded.len(), 1);
            prop_assert_eq!(&decoded[0].cuenta, &r.cuenta);
            prop_assert_eq!(&decoded[0].field_id, &r.field_id);
            prop_assert_eq!(&decoded[0].structure_type, &r.structure_type);
            prop_assert_eq!(&decoded[0].dim_width, &r.dim_width);
            prop_assert_eq!(decoded[0].coordinates, r.coordinates);
        }
    }
}
