//! Persisted classifier artifact
//!
//! The trained estimator is exported to JSON:
//!
//! ```json
//! { "format_version": 1, "n_features": 3,
//!   "model": { "type": "logistic_regression",
//!              "coefficients": [0.8, -1.2, 2.1], "intercept": -0.3 } }
//! ```
//!
//! Everything structural is checked here, at load time, so evaluation never
//! has to deal with a malformed model.

use serde::Deserialize;

use super::classifier::{Classifier, DecisionTree, LogisticRegression, RandomForest, TreeNode};
use crate::error::ModelError;
use crate::models::{Label, FEATURE_COUNT};

/// Only artifact layout understood by this build
pub const FORMAT_VERSION: u32 = 1;

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub n_features: usize,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
    DecisionTree {
        nodes: Vec<NodeSpec>,
    },
    RandomForest {
        trees: Vec<Vec<NodeSpec>>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Leaf {
        leaf: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Validate the artifact and build its evaluator
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(incompatible(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        if self.n_features != FEATURE_COUNT {
            return Err(incompatible(format!(
                "model expects {} features, readings provide {}",
                self.n_features, FEATURE_COUNT
            )));
        }

        match self.model {
            ModelSpec::LogisticRegression { coefficients, intercept, threshold } => {
                Ok(Box::new(build_logistic(coefficients, intercept, threshold)?))
            }
            ModelSpec::DecisionTree { nodes } => Ok(Box::new(build_tree(nodes)?)),
            ModelSpec::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(incompatible("random forest has no trees"));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, nodes)| {
                        build_tree(nodes).map_err(|e| match e {
                            ModelError::Incompatible(msg) => incompatible(format!("tree {}: {}", i, msg)),
                            other => other,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Box::new(RandomForest::from_validated(trees)))
            }
        }
    }
}

fn incompatible(msg: impl Into<String>) -> ModelError {
    ModelError::Incompatible(msg.into())
}

fn build_logistic(
    coefficients: Vec<f64>,
    intercept: f64,
    threshold: f64,
) -> Result<LogisticRegression, ModelError> {
    let coefficients: [f64; FEATURE_COUNT] = coefficients.try_into().map_err(|c: Vec<f64>| {
        incompatible(format!("expected {} coefficients, got {}", FEATURE_COUNT, c.len()))
    })?;

    if !coefficients.iter().all(|c| c.is_finite()) || !intercept.is_finite() {
        return Err(incompatible("coefficients and intercept must be finite"));
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(incompatible(format!("threshold {} outside [0, 1]", threshold)));
    }

    Ok(LogisticRegression { coefficients, intercept, threshold })
}

fn build_tree(nodes: Vec<NodeSpec>) -> Result<DecisionTree, ModelError> {
    if nodes.is_empty() {
        return Err(incompatible("tree has no nodes"));
    }

    let count = nodes.len();
    let nodes = nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| match node {
            NodeSpec::Leaf { leaf } => Label::from_class(leaf)
                .map(TreeNode::Leaf)
                .ok_or_else(|| incompatible(format!("node {}: leaf label {} is not 0 or 1", index, leaf))),
            NodeSpec::Split { feature, threshold, left, right } => {
                if feature >= FEATURE_COUNT {
                    return Err(incompatible(format!("node {}: feature {} out of range", index, feature)));
                }
                if !threshold.is_finite() {
                    return Err(incompatible(format!("node {}: threshold must be finite", index)));
                }
                // Forward-only children keep evaluation acyclic
                for child in [left, right] {
                    if child <= index || child >= count {
                        return Err(incompatible(format!("node {}: invalid child index {}", index, child)));
                    }
                }
                Ok(TreeNode::Split { feature, threshold, left, right })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecisionTree::from_validated(nodes))
}
