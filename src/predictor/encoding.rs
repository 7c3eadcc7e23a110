// src/predictor/encoding.rs
//
// Turns a PropertyRecord into the dense row a fitted model expects: the
// numeric inputs in fit order, then one indicator column per fitted category
// value, field by field.

use crate::domain::PropertyRecord;
use crate::errors::StartupError;
use crate::predictor::{CategoricalField, NumericField, PredictionError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Category values seen at fit time, per categorical field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vocabulary {
    pub title: Vec<String>,
    pub town: Vec<String>,
    pub state: Vec<String>,
}

impl Vocabulary {
    pub fn get(&self, field: CategoricalField) -> &[String] {
        match field {
            CategoricalField::Title => &self.title,
            CategoricalField::Town => &self.town,
            CategoricalField::State => &self.state,
        }
    }

    /// Reject a record carrying a value the model never saw.
    pub fn check(&self, record: &PropertyRecord) -> Result<(), PredictionError> {
        for field in CategoricalField::ALL {
            let value = field.read(record);
            if !self.get(field).iter().any(|c| c == value) {
                return Err(PredictionError::UnseenCategory {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        for field in CategoricalField::ALL {
            let values = self.get(field);
            if values.is_empty() {
                return Err(format!("no fitted categories for '{field}'"));
            }
            for (i, v) in values.iter().enumerate() {
                if values[..i].contains(v) {
                    return Err(format!("'{field}' lists '{v}' twice"));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureLayout {
    pub numeric: Vec<NumericField>,
    pub categories: Vocabulary,
}

impl FeatureLayout {
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let layout: FeatureLayout =
            serde_json::from_str(&raw).map_err(|source| StartupError::Artifact {
                path: path.to_path_buf(),
                source,
            })?;

        layout
            .validate()
            .map_err(|reason| StartupError::InvalidArtifact {
                path: path.to_path_buf(),
                reason,
            })?;

        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.numeric.is_empty() {
            return Err("layout has no numeric columns".into());
        }
        for (i, field) in self.numeric.iter().enumerate() {
            if self.numeric[..i].contains(field) {
                return Err(format!("numeric column {field:?} repeated"));
            }
        }
        self.categories.validate()
    }

    pub fn width(&self) -> usize {
        self.numeric.len()
            + CategoricalField::ALL
                .iter()
                .map(|f| self.categories.get(*f).len())
                .sum::<usize>()
    }

    pub fn encode(&self, record: &PropertyRecord) -> Result<Vec<f32>, PredictionError> {
        self.categories.check(record)?;

        let mut row = Vec::with_capacity(self.width());
        row.extend(self.numeric.iter().map(|f| f.read(record) as f32));
        for field in CategoricalField::ALL {
            let value = field.read(record);
            row.extend(
                self.categories
                    .get(field)
                    .iter()
                    .map(|c| if c == value { 1.0 } else { 0.0 }),
            );
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::sample_record;

    fn small_layout() -> FeatureLayout {
        serde_json::from_str(
            r#"{
                "numeric": ["bedrooms", "parking_space"],
                "categories": {
                    "title": ["Terraced Duplexes", "Detached Duplex"],
                    "town": ["Lekki", "Ikoyi"],
                    "state": ["Lagos"]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn encodes_numeric_then_indicator_columns() {
        let layout = small_layout();
        assert_eq!(layout.width(), 7);

        let row = layout.encode(&sample_record()).unwrap();
        assert_eq!(row, vec![4.0, 3.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn unseen_value_is_rejected_before_encoding() {
        let mut record = sample_record();
        record.state = "Kano".into();

        match small_layout().encode(&record).unwrap_err() {
            PredictionError::UnseenCategory { field, value } => {
                assert_eq!(field, CategoricalField::State);
                assert_eq!(value, "Kano");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_or_empty_vocabulary_is_invalid() {
        let mut layout = small_layout();
        layout.categories.town.push("Lekki".into());
        assert!(layout.validate().is_err());

        let mut layout = small_layout();
        layout.categories.state.clear();
        assert!(layout.validate().is_err());

        let mut layout = small_layout();
        layout.numeric.push(NumericField::Bedrooms);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn bundled_layout_covers_the_catalog() {
        let layout = FeatureLayout::load(Path::new("models/feature_layout.json")).unwrap();
        assert_eq!(layout.width(), 4 + 7 + 63 + 36);

        let row = layout.encode(&sample_record()).unwrap();
        assert_eq!(&row[..4], &[4.0, 4.0, 5.0, 3.0]);
        assert_eq!(row[4..].iter().filter(|v| **v == 1.0).count(), 3);
    }
}
