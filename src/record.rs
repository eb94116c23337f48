use std::path::Path;

use serde::Deserialize;

use crate::error::{PlasmapError, Result};

/// Strand direction of a feature. Decides which end of the arc carries the arrowhead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Arrowhead at `start`.
    Antisense,
    /// Arrowhead at `stop`. Anything that is not `antisense` reads as sense.
    #[default]
    #[serde(other)]
    Sense,
}

/// An annotated span of the circular sequence, in base pairs clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub start: i64,
    pub stop: i64,
    pub orientation: Orientation,
}

impl Feature {
    pub fn new(name: impl Into<String>, start: i64, stop: i64, orientation: Orientation) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
            orientation,
        }
    }

    /// True when the span cannot be drawn faithfully by the non-wrapping model.
    pub fn is_degenerate(&self, length: u64) -> bool {
        let length = length as i64;
        self.start < 0
            || self.stop < 0
            || self.start > length
            || self.stop > length
            || self.start > self.stop
    }
}

/// A circular sequence with its annotations. Feature order is draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRecord {
    pub name: String,
    pub length: u64,
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    name: Option<String>,
    length: Option<u64>,
    features: Option<Vec<RawFeature>>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    name: Option<String>,
    start: Option<i64>,
    stop: Option<i64>,
    #[serde(default)]
    orientation: Orientation,
}

impl SequenceRecord {
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawRecord = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawRecord = serde_yaml::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Reads a record, picking YAML for `.yaml`/`.yml` and JSON otherwise.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if is_yaml_path(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    fn from_raw(raw: RawRecord) -> Result<Self> {
        let name = raw.name.ok_or_else(|| missing("name"))?;
        let length = raw.length.ok_or_else(|| missing("length"))?;
        let raw_features = raw.features.ok_or_else(|| missing("features"))?;

        let mut features = Vec::with_capacity(raw_features.len());
        for (idx, feature) in raw_features.into_iter().enumerate() {
            features.push(Feature {
                name: feature
                    .name
                    .ok_or_else(|| missing(&format!("features[{}].name", idx)))?,
                start: feature
                    .start
                    .ok_or_else(|| missing(&format!("features[{}].start", idx)))?,
                stop: feature
                    .stop
                    .ok_or_else(|| missing(&format!("features[{}].stop", idx)))?,
                orientation: feature.orientation,
            });
        }

        Ok(Self {
            name,
            length,
            features,
        })
    }

    /// Name of the raster artifact produced for this record.
    pub fn export_file_name(&self, extension: &str) -> String {
        format!("{}_vector.{}", self.name, extension)
    }
}

fn missing(field: &str) -> PlasmapError {
    PlasmapError::MissingField(field.to_string())
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{Orientation, SequenceRecord};
    use crate::error::PlasmapError;

    const PUC19: &str = r#"{
        "name": "pUC19",
        "length": 2686,
        "features": [
            {"name": "lacZ alpha", "start": 146, "stop": 469, "orientation": "antisense"},
            {"name": "AmpR", "start": 1626, "stop": 2486, "orientation": "sense"},
            {"name": "ori", "start": 867, "stop": 1456}
        ]
    }"#;

    #[test]
    fn parses_json_record() {
        let record = SequenceRecord::from_json(PUC19).expect("valid record");
        assert_eq!(record.name, "pUC19");
        assert_eq!(record.length, 2686);
        assert_eq!(record.features.len(), 3);
        assert_eq!(record.features[0].orientation, Orientation::Antisense);
        assert_eq!(record.features[1].orientation, Orientation::Sense);
    }

    #[test]
    fn missing_or_unknown_orientation_reads_as_sense() {
        let record = SequenceRecord::from_json(
            r#"{"name":"x","length":100,"features":[
                {"name":"a","start":0,"stop":10},
                {"name":"b","start":0,"stop":10,"orientation":"forward"}
            ]}"#,
        )
        .expect("valid record");
        assert_eq!(record.features[0].orientation, Orientation::Sense);
        assert_eq!(record.features[1].orientation, Orientation::Sense);
    }

    #[test]
    fn orientation_strings_other_than_antisense_read_as_sense() {
        for (text, expected) in [
            ("antisense", Orientation::Antisense),
            ("sense", Orientation::Sense),
            ("forward", Orientation::Sense),
            ("", Orientation::Sense),
        ] {
            let orientation: Orientation =
                serde_json::from_str(&format!("{:?}", text)).expect("orientation string");
            assert_eq!(orientation, expected, "{:?}", text);
        }
    }

    #[test]
    fn extreme_coordinates_parse_without_checks() {
        let record = SequenceRecord::from_json(
            r#"{"name":"x","length":1000,"features":[{"name":"a","start":9000000000000000000,"stop":-9000000000000000000}]}"#,
        )
        .expect("permissive parse");
        assert!(record.features[0].is_degenerate(record.length));
    }

    #[test]
    fn parses_yaml_record() {
        let yaml = "name: pX\nlength: 500\nfeatures:\n  - name: tag\n    start: 10\n    stop: 90\n    orientation: antisense\n";
        let record = SequenceRecord::from_yaml(yaml).expect("valid yaml record");
        assert_eq!(record.features[0].name, "tag");
        assert_eq!(record.features[0].orientation, Orientation::Antisense);
    }

    #[test]
    fn missing_top_level_field_fails_fast() {
        let err = SequenceRecord::from_json(r#"{"name":"x","features":[]}"#).unwrap_err();
        assert!(matches!(err, PlasmapError::MissingField(ref f) if f == "length"));
    }

    #[test]
    fn missing_feature_field_names_its_path() {
        let err = SequenceRecord::from_json(
            r#"{"name":"x","length":10,"features":[{"name":"a","start":1,"stop":2},{"name":"b","stop":3}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "missing required field `features[1].start`");
    }

    #[test]
    fn inverted_span_is_degenerate_but_accepted() {
        let record = SequenceRecord::from_json(
            r#"{"name":"x","length":100,"features":[{"name":"a","start":80,"stop":20}]}"#,
        )
        .expect("permissive parse");
        assert!(record.features[0].is_degenerate(record.length));
    }

    #[test]
    fn export_file_name_uses_record_name() {
        let record = SequenceRecord::from_json(PUC19).expect("valid record");
        assert_eq!(record.export_file_name("png"), "pUC19_vector.png");
    }
}
