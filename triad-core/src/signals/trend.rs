//! Trend filter: SMA level comparisons at the current bar.
//!
//! Both modes share one evaluator and differ only in their row of
//! `TREND_RULES`.
//!
//! | mode     | long                        | short                       |
//! |----------|-----------------------------|-----------------------------|
//! | pullback | mid > long and short < mid  | mid < long and short > mid  |
//! | stacked  | short > mid and mid > long  | short < mid and mid < long  |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::indicators::IndicatorRow;

/// Which SMA arrangement counts as a tradeable trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMode {
    /// Buy dips in an uptrend, sell rallies in a downtrend.
    #[default]
    Pullback,
    /// Require the three SMAs to be fully stacked.
    Stacked,
}

impl TrendMode {
    pub const ALL: [TrendMode; 2] = [TrendMode::Pullback, TrendMode::Stacked];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendMode::Pullback => "pullback",
            TrendMode::Stacked => "stacked",
        }
    }

    pub fn rule(&self) -> &'static TrendRule {
        &TREND_RULES[*self as usize]
    }
}

impl fmt::Display for TrendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pullback" => Ok(TrendMode::Pullback),
            "stacked" => Ok(TrendMode::Stacked),
            other => Err(format!(
                "unknown trend mode '{other}' (expected pullback or stacked)"
            )),
        }
    }
}

/// One of the three trend SMAs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmaLeg {
    Short,
    Mid,
    Long,
}

impl SmaLeg {
    fn read(&self, row: &IndicatorRow) -> Option<f64> {
        match self {
            SmaLeg::Short => row.sma_short,
            SmaLeg::Mid => row.sma_mid,
            SmaLeg::Long => row.sma_long,
        }
    }
}

/// Strict comparison between two legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Above,
    Below,
}

/// `lhs` is strictly above / below `rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCheck {
    pub lhs: SmaLeg,
    pub relation: Relation,
    pub rhs: SmaLeg,
}

impl LevelCheck {
    const fn new(lhs: SmaLeg, relation: Relation, rhs: SmaLeg) -> Self {
        Self { lhs, relation, rhs }
    }

    /// False when either leg is undefined.
    pub fn holds(&self, row: &IndicatorRow) -> bool {
        match (self.lhs.read(row), self.rhs.read(row)) {
            (Some(l), Some(r)) => match self.relation {
                Relation::Above => l > r,
                Relation::Below => l < r,
            },
            _ => false,
        }
    }
}

/// Long and short conditions of one trend mode. Each side is a conjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendRule {
    pub long: [LevelCheck; 2],
    pub short: [LevelCheck; 2],
}

use Relation::{Above, Below};
use SmaLeg::{Long, Mid, Short};

/// Indexed by `TrendMode as usize`.
pub const TREND_RULES: [TrendRule; 2] = [
    // Pullback
    TrendRule {
        long: [
            LevelCheck::new(Mid, Above, Long),
            LevelCheck::new(Short, Below, Mid),
        ],
        short: [
            LevelCheck::new(Mid, Below, Long),
            LevelCheck::new(Short, Above, Mid),
        ],
    },
    // Stacked
    TrendRule {
        long: [
            LevelCheck::new(Short, Above, Mid),
            LevelCheck::new(Mid, Above, Long),
        ],
        short: [
            LevelCheck::new(Short, Below, Mid),
            LevelCheck::new(Mid, Below, Long),
        ],
    },
];

/// `(trend_long_ok, trend_short_ok)` for the row at the current bar.
pub fn evaluate_trend(mode: TrendMode, row: &IndicatorRow) -> (bool, bool) {
    let rule = mode.rule();
    let long = rule.long.iter().all(|c| c.holds(row));
    let short = rule.short.iter().all(|c| c.holds(row));
    (long, short)
}
