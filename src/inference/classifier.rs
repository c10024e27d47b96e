//! Classifier capability and the estimators an artifact can describe

use crate::error::InferenceError;
use crate::models::{FeatureVector, Label, FEATURE_COUNT};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Anything that maps a feature vector to a binary label
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<Label, InferenceError>;

    /// Short name reported on the health endpoint
    fn kind(&self) -> &'static str;
}

// ============================================================================
// LOGISTIC REGRESSION
// ============================================================================

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
    pub threshold: f64,
}

impl LogisticRegression {
    fn decision_value(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_array())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the fault class
    pub fn probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let z = self.decision_value(features);
        if !z.is_finite() {
            return Err(InferenceError(format!("decision value is not finite ({})", z)));
        }
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LogisticRegression {
    fn classify(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        let p = self.probability(features)?;
        Ok(if p >= self.threshold { Label::Fault } else { Label::Normal })
    }

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }
}

// ============================================================================
// DECISION TREE / RANDOM FOREST
// ============================================================================

/// Node of a flattened binary tree, root at index 0
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(Label),
}

/// Flattened tree whose child indices always point forward
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Caller guarantees the node layout was validated (see `artifact`)
    pub(crate) fn from_validated(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn evaluate(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf(label)) => return Ok(*label),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = features
                        .get(*feature)
                        .ok_or_else(|| InferenceError(format!("feature index {} out of range", feature)))?;
                    // scikit-learn convention: `<=` goes left
                    index = if value <= *threshold { *left } else { *right };
                }
                None => return Err(InferenceError(format!("tree node {} does not exist", index))),
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn classify(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        self.evaluate(features)
    }

    fn kind(&self) -> &'static str {
        "decision_tree"
    }
}

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn from_validated(trees: Vec<DecisionTree>) -> Self {
        Self { trees }
    }
}

impl Classifier for RandomForest {
    /// Majority vote; a tie counts as a fault
    fn classify(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        let mut faults = 0usize;
        for tree in &self.trees {
            if tree.evaluate(features)? == Label::Fault {
                faults += 1;
            }
        }
        let normals = self.trees.len() - faults;
        Ok(if faults >= normals { Label::Fault } else { Label::Normal })
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }
}
