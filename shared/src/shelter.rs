use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geo::LatLng;

/// Characters escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Shelter identifier as emitted by the data provider. Database rows use
/// integer keys; imported lists sometimes carry text codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShelterId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ShelterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ShelterId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ShelterId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

/// One designated evacuation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(
        default,
        deserialize_with = "lenient_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<u32>,
    /// Facility type label (school, community center, ...).
    #[serde(
        default,
        deserialize_with = "lenient_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub other: Option<String>,
}

impl Shelter {
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Relative URL of the server-rendered detail page. Text ids are
    /// percent-encoded as one path segment.
    pub fn detail_path(&self) -> String {
        match &self.id {
            ShelterId::Number(id) => format!("/shelter/{id}"),
            ShelterId::Text(id) => format!("/shelter/{}", utf8_percent_encode(id, PATH_SEGMENT)),
        }
    }
}

/// A dataset entry that could not be turned into a [`Shelter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

/// Parsed shelter payload. Records keep their payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShelterDataset {
    pub shelters: Vec<Shelter>,
    pub rejected: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    InvalidJson(String),
    NotAnArray,
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(e) => write!(f, "shelter payload is not valid JSON: {e}"),
            Self::NotAnArray => f.write_str("shelter payload is not a JSON array"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Parse the embedded shelter payload.
///
/// A blank payload is an empty dataset. Each array element is decoded on its
/// own so a single bad record does not hide the rest of the map.
pub fn parse_dataset(raw: &str) -> Result<ShelterDataset, DatasetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(ShelterDataset::default());
    }

    let value: Value =
        serde_json::from_str(raw).map_err(|e| DatasetError::InvalidJson(e.to_string()))?;
    let Value::Array(records) = value else {
        return Err(DatasetError::NotAnArray);
    };

    let mut dataset = ShelterDataset {
        shelters: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
    };
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Shelter>(record) {
            Ok(shelter) if shelter.position().is_valid() => dataset.shelters.push(shelter),
            Ok(shelter) => dataset.rejected.push(RejectedRecord {
                index,
                reason: format!(
                    "coordinates out of range ({}, {})",
                    shelter.latitude, shelter.longitude
                ),
            }),
            Err(e) => dataset.rejected.push(RejectedRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }
    Ok(dataset)
}

/// Extract a head count from free text such as `"1,200人"` or `"約 350 名"`.
/// The first digit group wins; thousands separators are dropped.
pub fn parse_capacity_text(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// The provider's capacity column has an empty-string server default and
// imported rows may carry free text.
fn lenient_capacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|v| *v >= 0.0 && v.fract() == 0.0)
                    .map(|v| v as u64)
            })
            .and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => parse_capacity_text(&s),
        _ => None,
    })
}

// Imports store `false` when the facility-type column is missing.
fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numeric_and_text_ids() {
        let payload = json!([
            {"id": 7, "name": "A", "latitude": 35.33, "longitude": 139.40, "address": "x"},
            {"id": "B-12", "name": "B", "latitude": 35.34, "longitude": 139.41, "address": "y"}
        ])
        .to_string();

        let dataset = parse_dataset(&payload).expect("payload should parse");
        assert!(dataset.rejected.is_empty());
        assert_eq!(dataset.shelters[0].id, ShelterId::Number(7));
        assert_eq!(dataset.shelters[1].id, ShelterId::Text("B-12".to_string()));
    }

    #[test]
    fn detail_path_uses_id() {
        let dataset = parse_dataset(
            r#"[{"id": 42, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a"}]"#,
        )
        .expect("payload should parse");
        assert_eq!(dataset.shelters[0].detail_path(), "/shelter/42");
    }

    #[test]
    fn detail_path_encodes_text_ids_as_one_segment() {
        let dataset = parse_dataset(
            r#"[{"id": "A 1/2?x#y", "name": "n", "latitude": 35.0, "longitude": 139.0},
                {"id": "s-4", "name": "m", "latitude": 35.0, "longitude": 139.0}]"#,
        )
        .expect("payload should parse");
        assert_eq!(dataset.shelters[0].detail_path(), "/shelter/A%201%2F2%3Fx%23y");
        assert_eq!(dataset.shelters[1].detail_path(), "/shelter/s-4");
    }

    #[test]
    fn non_integer_ids_and_text_coordinates_are_rejected() {
        let dataset = parse_dataset(
            r#"[{"id": 3.0, "name": "n", "latitude": 35.0, "longitude": 139.0},
                {"id": 4, "name": "m", "latitude": "35.0", "longitude": 139.0}]"#,
        )
        .expect("payload should parse");
        assert!(dataset.shelters.is_empty());
        assert_eq!(
            dataset.rejected.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn missing_capacity_is_none() {
        let dataset = parse_dataset(
            r#"[
                {"id": 1, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a"},
                {"id": 2, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "capacity": null},
                {"id": 3, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "capacity": ""}
            ]"#,
        )
        .expect("payload should parse");
        assert!(dataset.shelters.iter().all(|s| s.capacity.is_none()));
    }

    #[test]
    fn capacity_accepts_numbers_and_text() {
        let dataset = parse_dataset(
            r#"[
                {"id": 1, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "capacity": 250},
                {"id": 2, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "capacity": 80.0},
                {"id": 3, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "capacity": "1,200人"}
            ]"#,
        )
        .expect("payload should parse");
        let capacities: Vec<_> = dataset.shelters.iter().map(|s| s.capacity).collect();
        assert_eq!(capacities, vec![Some(250), Some(80), Some(1200)]);
    }

    #[test]
    fn parse_capacity_text_takes_first_group() {
        assert_eq!(parse_capacity_text("約 350 名"), Some(350));
        assert_eq!(parse_capacity_text("12,345"), Some(12_345));
        assert_eq!(parse_capacity_text("100人 (体育館 40人)"), Some(100));
        assert_eq!(parse_capacity_text("なし"), None);
        assert_eq!(parse_capacity_text(""), None);
    }

    #[test]
    fn other_label_ignores_non_text() {
        let dataset = parse_dataset(
            r#"[
                {"id": 1, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "other": false},
                {"id": 2, "name": "n", "latitude": 35.0, "longitude": 139.0, "address": "a", "other": " 小学校 "}
            ]"#,
        )
        .expect("payload should parse");
        assert_eq!(dataset.shelters[0].other, None);
        assert_eq!(dataset.shelters[1].other.as_deref(), Some("小学校"));
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let dataset = parse_dataset(r#"[{"id": 1, "latitude": 35.0, "longitude": 139.0, "name": null}]"#)
            .expect("payload should parse");
        assert_eq!(dataset.shelters[0].name, "");
        assert_eq!(dataset.shelters[0].address, "");
    }

    #[test]
    fn bad_records_are_rejected_individually() {
        let dataset = parse_dataset(
            r#"[
                {"id": 1, "name": "ok", "latitude": 35.0, "longitude": 139.0, "address": "a"},
                {"id": 2, "name": "no coords", "address": "a"},
                {"id": 3, "name": "far", "latitude": 135.0, "longitude": 139.0, "address": "a"},
                {"id": 4, "name": "ok too", "latitude": 35.1, "longitude": 139.1, "address": "b"}
            ]"#,
        )
        .expect("payload should parse");

        let kept: Vec<_> = dataset.shelters.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(kept, vec!["ok", "ok too"]);
        let rejected: Vec<_> = dataset.rejected.iter().map(|r| r.index).collect();
        assert_eq!(rejected, vec![1, 2]);
    }

    #[test]
    fn non_array_payload_is_an_error() {
        assert_eq!(
            parse_dataset(r#"{"id": 1}"#),
            Err(DatasetError::NotAnArray)
        );
        assert!(matches!(
            parse_dataset("[{"),
            Err(DatasetError::InvalidJson(_))
        ));
    }

    #[test]
    fn blank_payload_is_empty_dataset() {
        assert_eq!(parse_dataset("  \n"), Ok(ShelterDataset::default()));
    }
}
