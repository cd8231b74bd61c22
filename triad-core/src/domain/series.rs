//! BarSeries: a validated, time-ordered bar sequence.

use std::ops::Index;

use serde::Serialize;

use super::Bar;
use crate::error::SeriesError;

/// Ordered bars with strictly increasing timestamps and finite prices.
///
/// Construction is the only validation point; every downstream computation
/// assumes index 0 is the earliest bar and never re-checks ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Validate and wrap a bar vector.
    ///
    /// Bad bars are rejected rather than skipped: dropping one would silently
    /// shift every later index.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.first_non_finite() {
                return Err(SeriesError::NonFinite { index, field });
            }
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(SeriesError::NonIncreasingTimestamp {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    /// Series holding only bars `0..len`. Used to check that truncating the
    /// future leaves past output unchanged.
    pub fn truncated(&self, len: usize) -> Result<Self, SeriesError> {
        Self::new(self.bars[..len.min(self.bars.len())].to_vec())
    }
}

impl Index<usize> for BarSeries {
    type Output = Bar;

    fn index(&self, index: usize) -> &Bar {
        &self.bars[index]
    }
}
