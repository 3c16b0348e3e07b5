//! Aggregate statistics over the record collection.

use crate::models::{Record, parse_decimal_prefix};
use std::collections::HashMap;

/// Aggregate view of the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStats {
    /// Total number of records.
    pub total: usize,
    /// Records carrying a photo.
    pub with_photo: usize,
    /// Records without a photo (imported from CSV).
    pub imported: usize,
    /// Records with at least one dimension entered.
    pub with_dimensions: usize,
    /// Sum of all parseable areas, square meters.
    pub total_area: f64,
    /// Record counts grouped by status.
    pub by_status: HashMap<String, usize>,
    /// Record counts grouped by structure type.
    pub by_type: HashMap<String, usize>,
    /// Record counts grouped by technology.
    pub by_technology: HashMap<String, usize>,
    /// Record counts grouped by face count.
    pub by_faces: HashMap<String, usize>,
}

impl InventoryStats {
    /// Computes the aggregate view. Records with an unparseable area
    /// contribute zero to `total_area`.
    #[must_use]
    pub fn compute(records: &[Record]) -> Self {
        let total = records.len();
        let with_photo = records.iter().filter(|r| !r.photo_uri.is_empty()).count();
        let with_dimensions = records
            .iter()
            .filter(|r| !r.dim_width.is_empty() || !r.dim_height.is_empty())
            .count();
        let total_area = records
            .iter()
            .filter_map(|r| r.area.as_deref().and_then(parse_decimal_prefix))
            .sum();

        Self {
            total,
            with_photo,
            imported: total - with_photo,
            with_dimensions,
            total_area,
            by_status: count_by(records, |r| &r.status),
            by_type: count_by(records, |r| &r.structure_type),
            by_technology: count_by(records, |r| &r.technology),
            by_faces: count_by(records, |r| &r.faces),
        }
    }
}

/// Sorts a grouped count into `(label, count)` pairs, descending by count,
/// omitting the empty label.
#[must_use]
pub fn sorted_entries(groups: &HashMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = groups
        .iter()
        .filter(|(label, _)| !label.is_empty())
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

fn count_by<'a>(
    records: &'a [Record],
    key: impl Fn(&'a Record) -> &'a str,
) -> HashMap<String, usize> {
    let mut groups = HashMap::new();
    for record in records {
        *groups.entry(key(record).to_string()).or_insert(0) += 1;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, RecordId};

    fn record(photo: &str, status: &str, width: &str, area: Option<&str>) -> Record {
        Record {
            id: RecordId::new("1"),
            photo_uri: photo.to_string(),
            coordinates: Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            },
            map_url: String::new(),
            saved_at: String::new(),
            cuenta: String::new(),
            field_id: String::new(),
            structure_type: "Valla".to_string(),
            technology: String::new(),
            faces: String::new(),
            status: status.to_string(),
            dim_width: width.to_string(),
            dim_height: String::new(),
            area: area.map(String::from),
        }
    }

    #[test]
    fn test_compute_totals_and_splits() {
        let records = vec![
            record("file:///a.jpg", "Calificada", "3", Some("12.00")),
            record("", "Calificada", "", None),
            record("", "Sin Proceso", "2", Some("bad")),
        ];
        let stats = InventoryStats::compute(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_photo, 1);
        assert_eq!(stats.imported, 2);
        assert_eq!(stats.with_dimensions, 2);
        // Unparseable area contributes zero.
        assert!((stats.total_area - 12.0).abs() < f64::EPSILON);
        assert_eq!(stats.by_status.get("Calificada"), Some(&2));
        assert_eq!(stats.by_type.get("Valla"), Some(&3));
    }

    #[test]
    fn test_sorted_entries_descending_without_empty_label() {
        let records = vec![
            record("", "Calificada", "", None),
            record("", "Calificada", "", None),
            record("", "Sin Proceso", "", None),
            record("", "", "", None),
        ];
        let stats = InventoryStats::compute(&records);
        let entries = sorted_entries(&stats.by_status);
        assert_eq!(entries, vec![("Calificada", 2), ("Sin Proceso", 1)]);
    }

    #[test]
    fn test_empty_collection() {
        let stats = InventoryStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.by_status.is_empty());
        assert!((stats.total_area).abs() < f64::EPSILON);
    }
}
