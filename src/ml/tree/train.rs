use super::model::{DecisionTreeModel, TreeNode};

/// Training hyperparameters for the Gini decision tree.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Maximum number of splits on any root-to-leaf path.
    pub max_depth: usize,
    /// Minimum number of rows required to attempt a split.
    pub min_samples_split: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_depth: 32,
            min_samples_split: 2,
        }
    }
}

/// Grow a CART tree by recursively minimizing weighted Gini impurity.
pub fn train_tree(
    x: &[Vec<f32>],
    y: &[u8],
    options: &TrainOptions,
) -> Result<DecisionTreeModel, String> {
    if x.is_empty() || y.is_empty() {
        return Err("Empty training set".to_string());
    }
    if x.len() != y.len() {
        return Err("Mismatched training inputs/labels".to_string());
    }
    let feature_len = x[0].len();
    if feature_len == 0 {
        return Err("No feature columns to split on".to_string());
    }
    for row in x {
        if row.len() != feature_len {
            return Err("Inconsistent feature row length".to_string());
        }
    }

    let rows: Vec<usize> = (0..x.len()).collect();
    let root = grow(x, y, &rows, 0, options);
    Ok(DecisionTreeModel {
        model_version: 1,
        feature_len,
        root,
    })
}

fn grow(x: &[Vec<f32>], y: &[u8], rows: &[usize], depth: usize, options: &TrainOptions) -> TreeNode {
    let counts = class_counts(y, rows);
    let pure = counts[0] == 0 || counts[1] == 0;
    if pure || depth >= options.max_depth || rows.len() < options.min_samples_split.max(2) {
        return TreeNode::Leaf {
            class: majority(counts),
        };
    }

    let parent_gini = gini(counts);
    let Some(split) = best_split(x, y, rows, parent_gini) else {
        return TreeNode::Leaf {
            class: majority(counts),
        };
    };

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    for &row in rows {
        if x[row][split.feature_index] <= split.threshold {
            left_rows.push(row);
        } else {
            right_rows.push(row);
        }
    }

    TreeNode::Split {
        feature_index: split.feature_index,
        threshold: split.threshold,
        left: Box::new(grow(x, y, &left_rows, depth + 1, options)),
        right: Box::new(grow(x, y, &right_rows, depth + 1, options)),
    }
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature_index: usize,
    threshold: f32,
    score: f64,
}

/// Exhaustive split search over all features and midpoint thresholds.
///
/// Features are scanned in index order and only strictly better scores
/// replace the incumbent, so equal-gain ties resolve to the first candidate
/// and the search is deterministic.
fn best_split(x: &[Vec<f32>], y: &[u8], rows: &[usize], parent_gini: f64) -> Option<BestSplit> {
    let n = rows.len();
    let feature_len = x[rows[0]].len();
    let mut best: Option<BestSplit> = None;

    for feature_index in 0..feature_len {
        let mut ordered: Vec<(f32, u8)> = rows
            .iter()
            .map(|&row| (x[row][feature_index], y[row]))
            .collect();
        ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total_pos: u32 = ordered.iter().map(|&(_, label)| u32::from(label != 0)).sum();
        let mut left_pos = 0u32;
        for i in 1..n {
            left_pos += u32::from(ordered[i - 1].1 != 0);
            if ordered[i].0 <= ordered[i - 1].0 {
                continue;
            }
            let left_n = i as u32;
            let right_n = (n - i) as u32;
            let left = gini([left_n - left_pos, left_pos]);
            let right = gini([right_n - (total_pos - left_pos), total_pos - left_pos]);
            let score = (left_n as f64 * left + right_n as f64 * right) / n as f64;
            if score + 1e-12 >= parent_gini {
                continue;
            }
            let threshold = midpoint(ordered[i - 1].0, ordered[i].0);
            if best.is_none_or(|b| score < b.score) {
                best = Some(BestSplit {
                    feature_index,
                    threshold,
                    score,
                });
            }
        }
    }
    best
}

fn midpoint(lower: f32, upper: f32) -> f32 {
    let mid = lower + (upper - lower) / 2.0;
    // Guard against rounding up to the right edge, which would send boundary
    // rows the wrong way.
    if mid >= upper { lower } else { mid }
}

fn class_counts(y: &[u8], rows: &[usize]) -> [u32; 2] {
    let mut counts = [0u32; 2];
    for &row in rows {
        counts[usize::from(y[row] != 0)] += 1;
    }
    counts
}

fn majority(counts: [u32; 2]) -> u8 {
    u8::from(counts[1] > counts[0])
}

fn gini(counts: [u32; 2]) -> f64 {
    let total = (counts[0] + counts[1]) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / total;
    let p1 = counts[1] as f64 / total;
    1.0 - p0 * p0 - p1 * p1
}
