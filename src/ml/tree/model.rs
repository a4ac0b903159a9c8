use serde::{Deserialize, Serialize};

/// One node of a trained decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node predicting a class.
    Leaf {
        /// Majority class of the training rows that reached this node.
        class: u8,
    },
    /// Internal binary split on a single feature.
    Split {
        /// Feature index used for the split.
        feature_index: usize,
        /// Rows with `feature <= threshold` go left.
        threshold: f32,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Walk the tree for one feature row.
    pub fn predict(&self, features: &[f32]) -> u8 {
        match self {
            TreeNode::Leaf { class } => *class,
            TreeNode::Split {
                feature_index,
                threshold,
                left,
                right,
            } => {
                let value = features.get(*feature_index).copied().unwrap_or(0.0);
                if value <= *threshold {
                    left.predict(features)
                } else {
                    right.predict(features)
                }
            }
        }
    }

    fn count_nodes(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + left.count_nodes() + right.count_nodes(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Trained Gini-criterion decision tree for binary classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeModel {
    /// Model format version.
    pub model_version: i64,
    /// Number of `f32` values expected per feature row.
    pub feature_len: usize,
    /// Root of the trained tree.
    pub root: TreeNode,
}

impl DecisionTreeModel {
    /// Predict the class for a single feature row.
    pub fn predict_row(&self, features: &[f32]) -> u8 {
        self.root.predict(features)
    }

    /// Predict a class for every row of a feature matrix.
    pub fn predict(&self, x: &[Vec<f32>]) -> Vec<u8> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Depth of the tree; a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
