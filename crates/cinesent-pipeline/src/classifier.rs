//! Trained binary classifiers.
//!
//! Artifacts are JSON documents tagged by `kind`. `linear` covers logistic
//! regression and linear SVMs exported as a weight vector plus intercept;
//! `multinomial_nb` covers naive Bayes exported as log priors and per-class
//! feature log probabilities.

use serde::Deserialize;

use crate::error::InferenceError;

/// Maps a feature vector to a raw class value.
pub trait Classifier: Send + Sync {
    /// Number of features every input vector must have.
    fn n_features(&self) -> usize;

    /// # Errors
    ///
    /// Returns [`InferenceError`] on a dimension mismatch or a non-finite score.
    fn predict(&self, features: &[f64]) -> Result<i64, InferenceError>;
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ClassifierSpec {
    Linear(LinearClassifier),
    MultinomialNb(MultinomialNb),
}

impl ClassifierSpec {
    pub(crate) fn build(self) -> Result<Box<dyn Classifier>, String> {
        Ok(match self {
            ClassifierSpec::Linear(model) => {
                model.validate()?;
                Box::new(model)
            }
            ClassifierSpec::MultinomialNb(model) => {
                model.validate()?;
                Box::new(model)
            }
        })
    }
}

fn check_dimensions(expected: usize, features: &[f64]) -> Result<(), InferenceError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(InferenceError::DimensionMismatch {
            expected,
            got: features.len(),
        })
    }
}

/// Binary linear model: `coef . x + intercept > 0` selects `classes[1]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    coef: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    /// # Errors
    ///
    /// Returns a reason string if the weights are empty or not finite.
    pub fn new(coef: Vec<f64>, intercept: f64, classes: [i64; 2]) -> Result<Self, String> {
        let model = Self {
            coef,
            intercept,
            classes,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), String> {
        if self.coef.is_empty() {
            return Err("coef is empty".to_string());
        }
        if let Some(i) = self.coef.iter().position(|w| !w.is_finite()) {
            return Err(format!("coef at column {i} is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        Ok(())
    }

    /// Signed distance from the decision boundary.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError`] on a dimension mismatch or a non-finite result.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_dimensions(self.coef.len(), features)?;
        let score = self
            .coef
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        if score.is_finite() {
            Ok(score)
        } else {
            Err(InferenceError::NonFiniteScore)
        }
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, features: &[f64]) -> Result<i64, InferenceError> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }
}

/// Multinomial naive Bayes: highest joint log likelihood wins, ties go to the earlier class.
#[derive(Debug, Clone, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<i64>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// # Errors
    ///
    /// Returns a reason string if the class and probability tables disagree in shape.
    pub fn new(
        classes: Vec<i64>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self, String> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), String> {
        if self.classes.len() < 2 {
            return Err(format!(
                "expected at least 2 classes, found {}",
                self.classes.len()
            ));
        }
        if self.class_log_prior.len() != self.classes.len() {
            return Err(format!(
                "class_log_prior has {} entries for {} classes",
                self.class_log_prior.len(),
                self.classes.len()
            ));
        }
        if self.feature_log_prob.len() != self.classes.len() {
            return Err(format!(
                "feature_log_prob has {} rows for {} classes",
                self.feature_log_prob.len(),
                self.classes.len()
            ));
        }

        let width = self.feature_log_prob[0].len();
        if width == 0 {
            return Err("feature_log_prob rows are empty".to_string());
        }
        if self.feature_log_prob.iter().any(|row| row.len() != width) {
            return Err("feature_log_prob rows differ in length".to_string());
        }
        if self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .any(|p| p.is_nan() || (p.is_infinite() && p.is_sign_positive()))
        {
            return Err("log probabilities contain NaN or +inf".to_string());
        }
        Ok(())
    }
}

impl Classifier for MultinomialNb {
    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn predict(&self, features: &[f64]) -> Result<i64, InferenceError> {
        check_dimensions(self.n_features(), features)?;

        let mut best: Option<(usize, f64)> = None;
        for (class_idx, (prior, row)) in self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .enumerate()
        {
            let jll = prior
                + row
                    .iter()
                    .zip(features)
                    .filter(|(_, x)| **x != 0.0)
                    .map(|(p, x)| p * x)
                    .sum::<f64>();

            // A zero-probability class scores -inf and simply loses the argmax.
            if jll.is_nan() || (jll.is_infinite() && jll.is_sign_positive()) {
                return Err(InferenceError::NonFiniteScore);
            }
            if best.map_or(true, |(_, top)| jll > top) {
                best = Some((class_idx, jll));
            }
        }

        match best {
            Some((_, top)) if top.is_infinite() => Err(InferenceError::NonFiniteScore),
            Some((idx, _)) => Ok(self.classes[idx]),
            None => Err(InferenceError::NoClasses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> LinearClassifier {
        LinearClassifier::new(vec![2.0, -3.0], 0.0, [0, 1]).unwrap()
    }

    fn nb() -> MultinomialNb {
        let half = 0.5_f64.ln();
        MultinomialNb::new(
            vec![0, 1],
            vec![half, half],
            vec![vec![-3.0, -1.0], vec![-1.0, -3.0]],
        )
        .unwrap()
    }

    #[test]
    fn linear_positive_side_selects_second_class() {
        assert_eq!(linear().predict(&[1.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn linear_negative_side_selects_first_class() {
        assert_eq!(linear().predict(&[0.0, 1.0]).unwrap(), 0);
    }

    #[test]
    fn linear_boundary_selects_first_class() {
        assert_eq!(linear().predict(&[0.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn linear_dimension_mismatch() {
        assert_eq!(
            linear().predict(&[1.0]),
            Err(InferenceError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn linear_non_finite_input() {
        assert_eq!(
            linear().predict(&[f64::NAN, 0.0]),
            Err(InferenceError::NonFiniteScore)
        );
    }

    #[test]
    fn linear_rejects_non_finite_weights() {
        assert!(LinearClassifier::new(vec![f64::INFINITY], 0.0, [0, 1]).is_err());
        assert!(LinearClassifier::new(vec![1.0], f64::NAN, [0, 1]).is_err());
        assert!(LinearClassifier::new(vec![], 0.0, [0, 1]).is_err());
    }

    #[test]
    fn nb_picks_most_likely_class() {
        assert_eq!(nb().predict(&[2.0, 0.0]).unwrap(), 1);
        assert_eq!(nb().predict(&[0.0, 2.0]).unwrap(), 0);
    }

    #[test]
    fn nb_tie_goes_to_first_class() {
        assert_eq!(nb().predict(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(nb().predict(&[1.0, 1.0]).unwrap(), 0);
    }

    #[test]
    fn nb_dimension_mismatch() {
        assert!(matches!(
            nb().predict(&[1.0, 1.0, 1.0]),
            Err(InferenceError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn nb_zero_probability_class_loses() {
        let model = MultinomialNb::new(
            vec![0, 1],
            vec![0.5_f64.ln(), 0.5_f64.ln()],
            vec![vec![f64::NEG_INFINITY, -1.0], vec![-1.0, -1.0]],
        )
        .unwrap();
        assert_eq!(model.predict(&[1.0, 0.0]).unwrap(), 1);
        assert_eq!(model.predict(&[0.0, 1.0]).unwrap(), 0);
    }

    #[test]
    fn nb_every_class_impossible_is_error() {
        let model = MultinomialNb::new(
            vec![0, 1],
            vec![0.5_f64.ln(), 0.5_f64.ln()],
            vec![vec![f64::NEG_INFINITY], vec![f64::NEG_INFINITY]],
        )
        .unwrap();
        assert_eq!(model.predict(&[1.0]), Err(InferenceError::NonFiniteScore));
    }

    #[test]
    fn nb_rejects_nan_or_positive_infinity() {
        assert!(MultinomialNb::new(vec![0, 1], vec![0.0, f64::NAN], vec![vec![0.0], vec![0.0]])
            .is_err());
        let err = MultinomialNb::new(
            vec![0, 1],
            vec![0.0, 0.0],
            vec![vec![f64::INFINITY], vec![0.0]],
        )
        .unwrap_err();
        assert!(err.contains("+inf"), "got: {err}");
    }

    #[test]
    fn nb_rejects_mismatched_tables() {
        assert!(MultinomialNb::new(vec![0, 1], vec![0.0], vec![vec![0.0], vec![0.0]]).is_err());
        assert!(MultinomialNb::new(vec![0, 1], vec![0.0, 0.0], vec![vec![0.0]]).is_err());
        assert!(
            MultinomialNb::new(vec![0, 1], vec![0.0, 0.0], vec![vec![0.0], vec![0.0, 1.0]])
                .is_err()
        );
        assert!(MultinomialNb::new(vec![1], vec![0.0], vec![vec![0.0]]).is_err());
    }

    #[test]
    fn parses_linear_artifact() {
        let spec: ClassifierSpec = serde_json::from_value(serde_json::json!({
            "kind": "linear",
            "coef": [1.0, -1.0],
            "intercept": 0.25,
            "classes": [0, 1]
        }))
        .unwrap();
        let model = spec.build().unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn rejects_linear_artifact_with_three_classes() {
        let result = serde_json::from_value::<ClassifierSpec>(serde_json::json!({
            "kind": "linear",
            "coef": [1.0],
            "intercept": 0.0,
            "classes": [0, 1, 2]
        }));
        assert!(result.is_err());
    }
}
