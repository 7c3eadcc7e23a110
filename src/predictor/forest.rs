// src/predictor/forest.rs
//
// In-process tree-ensemble backend. An artifact is a JSON document exported
// from a fitted random forest: the category vocabularies it was trained on
// plus a flat node list per tree. No libxgboost needed; see `booster` for the
// library-backed alternative.

use crate::domain::PropertyRecord;
use crate::errors::StartupError;
use crate::predictor::encoding::Vocabulary;
use crate::predictor::{CategoricalField, NumericField, PredictionError, Predictor};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Regressor,
    Classifier,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Numeric(NumericField),
    /// 1.0 when the record's field equals `value`, else 0.0.
    OneHot {
        field: CategoricalField,
        value: String,
    },
}

impl Feature {
    fn value(&self, record: &PropertyRecord) -> f64 {
        match self {
            Feature::Numeric(field) => field.read(record),
            Feature::OneHot { field, value } => {
                if field.read(record) == value {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Split {
    pub feature: Feature,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split(Split),
    Leaf(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root; `x <= threshold` goes left.
    fn evaluate(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf(v)) => return Ok(*v),
                Some(Node::Split(split)) => {
                    idx = if split.feature.value(record) <= split.threshold {
                        split.left
                    } else {
                        split.right
                    };
                }
                None => return Err(PredictionError::Model(format!("dangling node {idx}"))),
            }
        }
    }

    fn validate(&self, kind: ModelKind) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".into());
        }

        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split(split) => {
                    if !split.threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    // Children strictly after the parent rules out cycles.
                    for child in [split.left, split.right] {
                        if child <= i || child >= len {
                            return Err(format!("node {i} points at invalid child {child}"));
                        }
                    }
                }
                Node::Leaf(v) => {
                    if !v.is_finite() {
                        return Err(format!("leaf {i} is not finite"));
                    }
                    if kind == ModelKind::Classifier && !(0.0..=1.0).contains(v) {
                        return Err(format!("leaf {i} is not a probability: {v}"));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forest {
    pub kind: ModelKind,
    pub categories: Vocabulary,
    pub trees: Vec<Tree>,
}

impl Forest {
    /// Read and validate an artifact. Any failure here is fatal to startup.
    pub fn load(path: &Path, expected: ModelKind) -> Result<Self, StartupError> {
        let raw = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let forest: Forest =
            serde_json::from_str(&raw).map_err(|source| StartupError::Artifact {
                path: path.to_path_buf(),
                source,
            })?;

        forest
            .validate(expected)
            .map_err(|reason| StartupError::InvalidArtifact {
                path: path.to_path_buf(),
                reason,
            })?;

        Ok(forest)
    }

    pub fn validate(&self, expected: ModelKind) -> Result<(), String> {
        if self.kind != expected {
            return Err(format!("expected a {expected:?} artifact, found {:?}", self.kind));
        }
        if self.trees.is_empty() {
            return Err("artifact has no trees".into());
        }
        self.categories.validate()?;
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.kind)
                .map_err(|reason| format!("tree {t}: {reason}"))?;
        }
        Ok(())
    }

    /// Mean leaf value across trees, after rejecting unseen categories.
    pub fn evaluate(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        self.categories.check(record)?;

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(record)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

/// Price model: mean of the trees' leaf values.
#[derive(Debug, Clone)]
pub struct ForestRegressor(pub Forest);

impl ForestRegressor {
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        Forest::load(path, ModelKind::Regressor).map(Self)
    }
}

impl Predictor for ForestRegressor {
    type Output = f64;

    fn predict(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        self.0.evaluate(record)
    }

    fn known_categories(&self, field: CategoricalField) -> Option<&[String]> {
        Some(self.0.categories.get(field))
    }
}

/// Category model: leaves hold P(class 1); the class with the higher mean
/// probability wins, ties go to class 0.
#[derive(Debug, Clone)]
pub struct ForestClassifier(pub Forest);

impl ForestClassifier {
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        Forest::load(path, ModelKind::Classifier).map(Self)
    }
}

impl Predictor for ForestClassifier {
    type Output = u8;

    fn predict(&self, record: &PropertyRecord) -> Result<u8, PredictionError> {
        let p = self.0.evaluate(record)?;
        Ok(if p > 0.5 { 1 } else { 0 })
    }

    fn known_categories(&self, field: CategoricalField) -> Option<&[String]> {
        Some(self.0.categories.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HouseType;
    use std::io::Write;

    fn record(bedrooms: u8, town: &str) -> PropertyRecord {
        PropertyRecord {
            bedrooms,
            bathrooms: 3,
            toilets: 3,
            parking_space: 2,
            title: HouseType::DetachedDuplex,
            town: town.into(),
            state: "Lagos".into(),
        }
    }

    fn artifact(kind: &str, leaves: (f64, f64, f64)) -> String {
        format!(
            r#"{{
                "kind": "{kind}",
                "categories": {{
                    "title": ["Detached Duplex"],
                    "town": ["Lekki", "Ikoyi"],
                    "state": ["Lagos"]
                }},
                "trees": [
                    {{ "nodes": [
                        {{ "split": {{ "feature": {{ "numeric": "bedrooms" }}, "threshold": 3.5, "left": 1, "right": 2 }} }},
                        {{ "leaf": {} }},
                        {{ "split": {{ "feature": {{ "one_hot": {{ "field": "town", "value": "Ikoyi" }} }}, "threshold": 0.5, "left": 3, "right": 4 }} }},
                        {{ "leaf": {} }},
                        {{ "leaf": {} }}
                    ] }},
                    {{ "nodes": [ {{ "leaf": {} }} ] }}
                ]
            }}"#,
            leaves.0, leaves.1, leaves.2, leaves.1
        )
    }

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn regressor_averages_tree_leaves() {
        let file = write_tmp(&artifact("regressor", (10.0, 20.0, 80.0)));
        let model = ForestRegressor::load(file.path()).unwrap();

        // Tree 1: bedrooms <= 3.5 -> 10, tree 2: 20.
        assert_eq!(model.predict(&record(3, "Lekki")).unwrap(), 15.0);
        // Tree 1: not Ikoyi -> 20.
        assert_eq!(model.predict(&record(5, "Lekki")).unwrap(), 20.0);
        // Tree 1: Ikoyi -> 80.
        assert_eq!(model.predict(&record(5, "Ikoyi")).unwrap(), 50.0);
    }

    #[test]
    fn classifier_thresholds_mean_probability() {
        let file = write_tmp(&artifact("classifier", (0.0, 0.5, 1.0)));
        let model = ForestClassifier::load(file.path()).unwrap();

        assert_eq!(model.predict(&record(2, "Lekki")).unwrap(), 0);
        // (0.5 + 0.5) / 2 is a tie and stays at class 0.
        assert_eq!(model.predict(&record(5, "Lekki")).unwrap(), 0);
        assert_eq!(model.predict(&record(5, "Ikoyi")).unwrap(), 1);
    }

    #[test]
    fn unseen_category_is_a_prediction_error() {
        let file = write_tmp(&artifact("regressor", (1.0, 2.0, 3.0)));
        let model = ForestRegressor::load(file.path()).unwrap();

        let err = model.predict(&record(3, "Ajah")).unwrap_err();
        match err {
            PredictionError::UnseenCategory { field, value } => {
                assert_eq!(field, CategoricalField::Town);
                assert_eq!(value, "Ajah");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let file = write_tmp(&artifact("classifier", (0.0, 0.5, 1.0)));
        let err = ForestRegressor::load(file.path()).unwrap_err();
        assert!(matches!(err, StartupError::InvalidArtifact { .. }));
    }

    #[test]
    fn missing_and_corrupt_artifacts_fail_to_load() {
        let missing = ForestRegressor::load(Path::new("/nonexistent/price.json")).unwrap_err();
        assert!(matches!(missing, StartupError::Read { .. }));

        let file = write_tmp("{ not json");
        let corrupt = ForestClassifier::load(file.path()).unwrap_err();
        assert!(matches!(corrupt, StartupError::Artifact { .. }));
    }

    #[test]
    fn cyclic_and_out_of_range_children_are_rejected() {
        let tree = Tree {
            nodes: vec![
                Node::Split(Split {
                    feature: Feature::Numeric(NumericField::Toilets),
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                }),
                Node::Leaf(1.0),
            ],
        };
        assert!(tree.validate(ModelKind::Regressor).is_err());

        let tree = Tree {
            nodes: vec![Node::Split(Split {
                feature: Feature::Numeric(NumericField::Toilets),
                threshold: 1.0,
                left: 1,
                right: 7,
            })],
        };
        assert!(tree.validate(ModelKind::Regressor).is_err());
    }

    #[test]
    fn classifier_leaves_must_be_probabilities() {
        let tree = Tree {
            nodes: vec![Node::Leaf(1.5)],
        };
        assert!(tree.validate(ModelKind::Classifier).is_err());
        assert!(tree.validate(ModelKind::Regressor).is_ok());
    }
}
