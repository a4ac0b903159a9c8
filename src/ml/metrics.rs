//! Evaluation metrics for binary classifiers.

use serde::{Deserialize, Serialize};

/// Confusion matrix for a binary classifier (positive class = 1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// True negatives.
    pub tn: u32,
    /// False positives.
    pub fp: u32,
    /// False negatives.
    pub fn_: u32,
    /// True positives.
    pub tp: u32,
}

impl ConfusionMatrix {
    /// Build a matrix from aligned truth/prediction label vectors.
    pub fn from_labels(truth: &[u8], predicted: &[u8]) -> Self {
        let mut cm = Self::default();
        for (&t, &p) in truth.iter().zip(predicted) {
            cm.add(t, p);
        }
        cm
    }

    pub fn add(&mut self, truth: u8, predicted: u8) {
        let cell = match (truth, predicted) {
            (0, 0) => &mut self.tn,
            (0, _) => &mut self.fp,
            (_, 0) => &mut self.fn_,
            _ => &mut self.tp,
        };
        *cell = cell.saturating_add(1);
    }

    /// Total number of counted pairs.
    pub fn total(&self) -> u32 {
        self.tn + self.fp + self.fn_ + self.tp
    }

    /// Fraction of correct predictions, 0 when the matrix is empty.
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.tn + self.tp) as f32 / total as f32
        }
    }
}

/// Precision/recall statistics for a single class.
#[derive(Debug, Clone)]
pub struct PerClassStats {
    /// `TP / (TP + FP)`, 0 when undefined.
    pub precision: f32,
    /// `TP / (TP + FN)`, 0 when undefined.
    pub recall: f32,
    /// Total number of true examples for the class.
    pub support: u32,
}

/// Per-class precision and recall, index 0 = negative class, 1 = positive.
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> [PerClassStats; 2] {
    [
        PerClassStats {
            precision: ratio(cm.tn, cm.tn + cm.fn_),
            recall: ratio(cm.tn, cm.tn + cm.fp),
            support: cm.tn + cm.fp,
        },
        PerClassStats {
            precision: ratio(cm.tp, cm.tp + cm.fp),
            recall: ratio(cm.tp, cm.tp + cm.fn_),
            support: cm.tp + cm.fn_,
        },
    ]
}

fn ratio(num: u32, denom: u32) -> f32 {
    if denom == 0 {
        0.0
    } else {
        num as f32 / denom as f32
    }
}

/// Fraction of predictions equal to the true label.
pub fn accuracy_score(truth: &[u8], predicted: &[u8]) -> f32 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    correct as f32 / truth.len() as f32
}

/// F1 score for the positive class.
///
/// Uses `2*TP / (2*TP + FP + FN)`, defined as 0 when the denominator is 0
/// (no positive predictions and no positive truths).
pub fn f1_score(truth: &[u8], predicted: &[u8]) -> f32 {
    let cm = ConfusionMatrix::from_labels(truth, predicted);
    let denom = 2 * cm.tp + cm.fp + cm.fn_;
    if denom == 0 {
        0.0
    } else {
        (2 * cm.tp) as f32 / denom as f32
    }
}

/// Z-score-normalize a sequence by its own mean and population standard
/// deviation (ddof = 0). Every element maps to 0 when the deviation is 0.
pub fn zscores(values: &[f32]) -> Vec<f32> {
    if values.is_empty() {
        return Vec::new();
    }
    let mean = values.iter().copied().sum::<f32>() / values.len() as f32;
    let mut var = 0.0_f64;
    for &v in values {
        let d = v as f64 - mean as f64;
        var += d * d;
    }
    let std = (var / values.len() as f64).sqrt() as f32;
    if std == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v - mean) / std).collect()
}

/// Stability statistic for a trial: mean absolute z-score of the predicted
/// labels. Constant predictions yield 0 rather than a division by zero.
pub fn mean_abs_zscore(predicted: &[u8]) -> f32 {
    if predicted.is_empty() {
        return 0.0;
    }
    let values: Vec<f32> = predicted.iter().map(|&p| p as f32).collect();
    let z = zscores(&values);
    z.iter().map(|v| v.abs()).sum::<f32>() / z.len() as f32
}

/// One operating point on a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    /// False positive rate.
    pub fpr: f32,
    /// True positive rate.
    pub tpr: f32,
}

/// ROC curve for positive-class scores, from (0,0) to (1,1).
///
/// Returns an empty curve when either class is absent from `truth`.
pub fn roc_curve(truth: &[u8], scores: &[f32]) -> Vec<RocPoint> {
    let positives = truth.iter().filter(|&&t| t != 0).count();
    let negatives = truth.len() - positives;
    if positives == 0 || negatives == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..truth.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut curve = vec![RocPoint { fpr: 0.0, tpr: 0.0 }];
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut idx = 0usize;
    while idx < order.len() {
        // Advance over ties so equal scores produce a single point.
        let threshold = scores[order[idx]];
        while idx < order.len() && scores[order[idx]] == threshold {
            if truth[order[idx]] != 0 {
                tp += 1;
            } else {
                fp += 1;
            }
            idx += 1;
        }
        curve.push(RocPoint {
            fpr: fp as f32 / negatives as f32,
            tpr: tp as f32 / positives as f32,
        });
    }
    curve
}

/// One operating point on a precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrPoint {
    /// Recall of the positive class.
    pub recall: f32,
    /// Precision of the positive class.
    pub precision: f32,
}

/// Precision-recall curve for positive-class scores.
///
/// Points are ordered by decreasing threshold, starting from the (0, 1)
/// sentinel. Returns an empty curve when no positive truths exist.
pub fn pr_curve(truth: &[u8], scores: &[f32]) -> Vec<PrPoint> {
    let positives = truth.iter().filter(|&&t| t != 0).count();
    if positives == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..truth.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut curve = vec![PrPoint {
        recall: 0.0,
        precision: 1.0,
    }];
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut idx = 0usize;
    while idx < order.len() {
        // Advance over ties so equal scores produce a single point.
        let threshold = scores[order[idx]];
        while idx < order.len() && scores[order[idx]] == threshold {
            if truth[order[idx]] != 0 {
                tp += 1;
            } else {
                fp += 1;
            }
            idx += 1;
        }
        curve.push(PrPoint {
            recall: tp as f32 / positives as f32,
            precision: tp as f32 / (tp + fp) as f32,
        });
    }
    curve
}

/// Average precision: the recall-weighted sum of precisions along the
/// precision-recall curve. Returns 0 when no positive truths exist.
pub fn average_precision(truth: &[u8], scores: &[f32]) -> f32 {
    let curve = pr_curve(truth, scores);
    let mut ap = 0.0_f64;
    for pair in curve.windows(2) {
        let delta = (pair[1].recall - pair[0].recall) as f64;
        ap += delta * pair[1].precision as f64;
    }
    ap as f32
}

/// Area under the ROC curve by trapezoidal integration.
///
/// Returns 0 when the curve is degenerate (one class absent).
pub fn roc_auc(truth: &[u8], scores: &[f32]) -> f32 {
    let curve = roc_curve(truth, scores);
    let mut auc = 0.0_f64;
    for pair in curve.windows(2) {
        let width = (pair[1].fpr - pair[0].fpr) as f64;
        let height = (pair[0].tpr + pair[1].tpr) as f64 / 2.0;
        auc += width * height;
    }
    auc as f32
}
