//! Integer score bands mapping a score onto a fixed classification.

use serde::Serialize;

/// Closed score range `[min, max]` and the value it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBand<T> {
    pub min: u32,
    pub max: u32,
    pub value: T,
}

impl<T> ScoreBand<T> {
    pub fn contains(&self, score: u32) -> bool {
        self.min <= score && score <= self.max
    }
}

/// Band misconfiguration found by [`BandTable::validate`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BandError {
    #[error("band table is empty")]
    Empty,
    #[error("band [{min}, {max}] is inverted")]
    Inverted { min: u32, max: u32 },
    #[error("scores {from}..={to} are not covered by any band")]
    Gap { from: u32, to: u32 },
    #[error("score {0} is covered by more than one band")]
    Overlap(u32),
    #[error("band ends at {end}, beyond the maximum score {max_score}")]
    BeyondMaximum { end: u32, max_score: u32 },
}

/// Ordered list of bands; lookups return the first band containing a score
#[derive(Debug)]
pub struct BandTable<T: 'static>(pub &'static [ScoreBand<T>]);

impl<T: 'static> BandTable<T> {
    pub fn bands(&self) -> &'static [ScoreBand<T>] {
        self.0
    }

    pub fn lookup(&self, score: u32) -> Option<&'static T> {
        self.0.iter().find(|b| b.contains(score)).map(|b| &b.value)
    }

    /// Check that every score in `[0, max_score]` falls in exactly one band.
    pub fn validate(&self, max_score: u32) -> Result<(), BandError> {
        if self.0.is_empty() {
            return Err(BandError::Empty);
        }

        let mut ranges: Vec<(u32, u32)> = self.0.iter().map(|b| (b.min, b.max)).collect();
        ranges.sort_unstable();

        let mut next = 0u32;
        for (min, max) in ranges {
            if min > max {
                return Err(BandError::Inverted { min, max });
            }
            if min > next {
                return Err(BandError::Gap {
                    from: next,
                    to: min - 1,
                });
            }
            if min < next {
                return Err(BandError::Overlap(min));
            }
            if max > max_score {
                return Err(BandError::BeyondMaximum {
                    end: max,
                    max_score,
                });
            }
            next = max + 1;
        }

        if next <= max_score {
            return Err(BandError::Gap {
                from: next,
                to: max_score,
            });
        }
        Ok(())
    }
}
