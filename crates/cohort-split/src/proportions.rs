use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
pub const DEFAULT_VAL_FRACTION: f64 = 0.1;

/// Validated train/validation fractions; the test set takes the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitProportions {
    train: f64,
    val: f64,
}

impl SplitProportions {
    /// Both fractions must be finite and non-negative, and sum to less than one.
    pub fn new(train: f64, val: f64) -> Result<Self> {
        let invalid = |reason| SplitError::InvalidProportions { train, val, reason };
        if !train.is_finite() || !val.is_finite() {
            return Err(invalid("fractions must be finite"));
        }
        if train < 0.0 || val < 0.0 {
            return Err(invalid("fractions must not be negative"));
        }
        if train + val >= 1.0 {
            return Err(invalid("train + val must be less than 1"));
        }
        Ok(Self { train, val })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn val(&self) -> f64 {
        self.val
    }

    pub fn test(&self) -> f64 {
        1.0 - self.train - self.val
    }

    /// Subset sizes for a cohort of `total`: `(train, val, test)`.
    ///
    /// Train and validation sizes are floored; the test set absorbs the remainder.
    pub fn sizes(&self, total: usize) -> (usize, usize, usize) {
        let n_train = ((total as f64) * self.train).floor() as usize;
        let n_train = n_train.min(total);
        let n_val = (((total as f64) * self.val).floor() as usize).min(total - n_train);
        (n_train, n_val, total - n_train - n_val)
    }
}

impl Default for SplitProportions {
    fn default() -> Self {
        Self {
            train: DEFAULT_TRAIN_FRACTION,
            val: DEFAULT_VAL_FRACTION,
        }
    }
}
