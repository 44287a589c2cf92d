use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError, check_row_len};

const TREE_LEAF: i64 = -1;

/// A single fitted decision tree stored as parallel node arrays.
///
/// Node `0` is the root. A node is a leaf when `children_left[node]` is `-1`.
/// Internal nodes send a row left when `row[feature] <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-class weights for every node, counts or fractions.
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == TREE_LEAF
    }

    pub fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ModelError::invalid("tree has no nodes"));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ModelError::invalid("tree node arrays differ in length"));
        }

        for node in 0..n {
            if self.value[node].len() != n_classes {
                return Err(ModelError::invalid(format!(
                    "node {} has {} class weights, expected {}",
                    node,
                    self.value[node].len(),
                    n_classes
                )));
            }
            if self.value[node].iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(ModelError::invalid(format!(
                    "node {} has a negative or non-finite class weight",
                    node
                )));
            }
            if self.is_leaf(node) {
                let total: f64 = self.value[node].iter().sum();
                if !(total > 0.0 && total.is_finite()) {
                    return Err(ModelError::invalid(format!(
                        "leaf {} has no positive class weight",
                        node
                    )));
                }
                continue;
            }

            // Children always come after their parent, so a descent terminates.
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ModelError::invalid(format!(
                        "node {} has out-of-order child {}",
                        node, child
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(ModelError::invalid(format!(
                    "node {} splits on unknown feature {}",
                    node, feature
                )));
            }
            if self.threshold[node].is_nan() {
                return Err(ModelError::invalid(format!("node {} has NaN threshold", node)));
            }
        }
        Ok(())
    }

    fn leaf_for(&self, row: &[f64]) -> usize {
        let mut node = 0;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Class probabilities for one row: the reached leaf's weights normalized to 1.
    pub fn predict_proba(&self, row: &[f64]) -> Vec<f64> {
        let weights = &self.value[self.leaf_for(row)];
        let total: f64 = weights.iter().sum();
        weights.iter().map(|w| w / total).collect()
    }
}

/// An ensemble of decision trees voting by averaged class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features_in: usize,
    pub classes: Vec<i64>,
    pub estimators: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features_in == 0 {
            return Err(ModelError::invalid("forest has no features"));
        }
        if self.classes.is_empty() {
            return Err(ModelError::invalid("forest has no classes"));
        }
        if self.estimators.is_empty() {
            return Err(ModelError::invalid("forest has no estimators"));
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            tree.validate(self.n_features_in, self.classes.len())
                .map_err(|e| ModelError::invalid(format!("estimator {}: {}", i, e)))?;
        }
        Ok(())
    }

    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_row_len(self.n_features_in, row)?;
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.estimators {
            for (acc, p) in proba.iter_mut().zip(tree.predict_proba(row)) {
                *acc += p;
            }
        }
        let n_trees = self.estimators.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        Ok(proba)
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features_in
    }

    fn predict(&self, row: &[f64]) -> Result<i64, ModelError> {
        let proba = self.predict_proba(row)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}
