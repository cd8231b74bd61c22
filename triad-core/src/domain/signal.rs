//! Per-bar signal output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete decision emitted for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything decided for one bar: the six sub-condition flags, the two
/// combined flags, and the final signal.
///
/// A record is final once its bar closes; nothing after bar `i` can change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalRecord {
    pub trend_long_ok: bool,
    pub trend_short_ok: bool,
    pub macd_up_ok: bool,
    pub macd_down_ok: bool,
    pub rsi_up_ok: bool,
    pub rsi_down_ok: bool,
    pub buy_signal: bool,
    pub sell_signal: bool,
    pub signal: Signal,
}

impl SignalRecord {
    /// All flags false, `HOLD`.
    pub fn hold() -> Self {
        Self::default()
    }

    /// Combine the six sub-conditions. BUY is checked first; SELL only when
    /// BUY does not hold.
    pub fn from_flags(
        trend_long_ok: bool,
        trend_short_ok: bool,
        macd_up_ok: bool,
        macd_down_ok: bool,
        rsi_up_ok: bool,
        rsi_down_ok: bool,
    ) -> Self {
        let buy_signal = trend_long_ok && macd_up_ok && rsi_up_ok;
        let sell_signal = !buy_signal && trend_short_ok && macd_down_ok && rsi_down_ok;
        let signal = if buy_signal {
            Signal::Buy
        } else if sell_signal {
            Signal::Sell
        } else {
            Signal::Hold
        };
        Self {
            trend_long_ok,
            trend_short_ok,
            macd_up_ok,
            macd_down_ok,
            rsi_up_ok,
            rsi_down_ok,
            buy_signal,
            sell_signal,
            signal,
        }
    }

    /// True for BUY or SELL.
    pub fn matches_criteria(&self) -> bool {
        self.buy_signal || self.sell_signal
    }
}
