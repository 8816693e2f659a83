use crate::indicators;
use crate::model::{Candle, Evidence, Signal, SignalKind};

/// The active signal rule. Selected once from configuration; the scanner
/// calls `evaluate` per symbol per cycle and emits at most one signal.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// BUY when RSI is oversold and the latest candle is a bullish engulfing
    /// of the previous one.
    OversoldReversal { rsi_period: usize, oversold: f64 },
    /// BUY/SELL when the last closed candle breaks out of its Bollinger band
    /// with confirming volume.
    BandBreakout {
        period: usize,
        num_std: f64,
        volume_factor: f64,
    },
}

impl Strategy {
    /// Minimum history length required before `evaluate` can produce a
    /// signal. Shorter series are skipped, not errors.
    pub fn min_candles(&self) -> usize {
        match self {
            Strategy::OversoldReversal { rsi_period, .. } => rsi_period + 2,
            Strategy::BandBreakout { period, .. } => period + 2,
        }
    }

    pub fn evaluate(&self, candles: &[Candle]) -> Option<Signal> {
        if candles.len() < self.min_candles() {
            return None;
        }
        match self {
            Strategy::OversoldReversal {
                rsi_period,
                oversold,
            } => evaluate_oversold_reversal(candles, *rsi_period, *oversold),
            Strategy::BandBreakout {
                period,
                num_std,
                volume_factor,
            } => evaluate_band_breakout(candles, *period, *num_std, *volume_factor),
        }
    }
}

fn evaluate_oversold_reversal(candles: &[Candle], period: usize, oversold: f64) -> Option<Signal> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let rsi = indicators::rsi(&closes, period);

    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];
    let last_rsi = rsi[candles.len() - 1];
    if last_rsi.is_nan() || last_rsi >= oversold {
        return None;
    }

    // Latest bullish body strictly contains the previous bearish body.
    let is_bullish_engulfing = last.close > last.open
        && prev.close < prev.open
        && last.close > prev.open
        && last.open < prev.close;
    if !is_bullish_engulfing {
        return None;
    }

    Some(Signal {
        symbol: last.symbol.clone(),
        kind: SignalKind::Buy,
        price: last.close,
        evidence: Evidence::OversoldReversal { rsi: last_rsi },
    })
}

fn evaluate_band_breakout(
    candles: &[Candle],
    period: usize,
    num_std: f64,
    volume_factor: f64,
) -> Option<Signal> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let bands = indicators::bollinger_bands(&closes, period, num_std);

    // The most recent candle may still be forming; judge the last closed one.
    let idx = candles.len() - 2;
    let candle = &candles[idx];
    let upper = bands.upper[idx];
    let lower = bands.lower[idx];
    if upper.is_nan() || lower.is_nan() {
        return None;
    }

    // Average over the `period` candles strictly before the judged candle;
    // neither it nor the forming candle contribute.
    let avg_volume =
        candles[idx - period..idx].iter().map(|c| c.volume).sum::<f64>() / period as f64;
    if avg_volume <= 0.0 {
        return None;
    }
    let volume_ratio = candle.volume / avg_volume;
    if volume_ratio <= volume_factor {
        return None;
    }

    // BUY takes precedence should both sides ever hold.
    let (kind, band) = if candle.close > upper {
        (SignalKind::Buy, upper)
    } else if candle.close < lower {
        (SignalKind::Sell, lower)
    } else {
        return None;
    };

    Some(Signal {
        symbol: candle.symbol.clone(),
        kind,
        price: candle.close,
        evidence: Evidence::BandBreakout { band, volume_ratio },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, close: f64, volume: f64) -> Candle {
        let high = open.max(close) + 0.5;
        let low = open.min(close) - 0.5;
        Candle {
            symbol: "BTCUSDT".to_string(),
            open,
            high,
            low,
            close,
            volume,
            open_time: 0,
        }
    }

    // Fourteen-period decline followed by a textbook bullish engulfing
    // candle; RSI at the final index is far below 30.
    fn reversal_series() -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..15)
            .map(|i| {
                let open = 100.0 - i as f64 * 2.0;
                candle(open, open - 2.0, 1000.0)
            })
            .collect();
        // Previous candle closed at 70 after opening at 72; engulf it.
        candles.push(candle(69.5, 74.5, 1500.0));
        candles
    }

    // Twenty mildly oscillating candles, a breakout close with twice the
    // average volume, then a still-forming candle.
    fn breakout_series(breakout_close: f64) -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..20)
            .map(|i| {
                let close = if i % 2 == 0 { 99.0 } else { 101.0 };
                candle(close, close, 1000.0)
            })
            .collect();
        candles.push(candle(100.0, breakout_close, 2000.0));
        candles.push(candle(breakout_close, breakout_close, 10.0));
        candles
    }

    fn oversold_reversal() -> Strategy {
        Strategy::OversoldReversal {
            rsi_period: 14,
            oversold: 30.0,
        }
    }

    fn band_breakout() -> Strategy {
        Strategy::BandBreakout {
            period: 20,
            num_std: 2.0,
            volume_factor: 1.5,
        }
    }

    #[test]
    fn oversold_reversal_emits_a_buy_on_the_textbook_setup() {
        let signal = oversold_reversal().evaluate(&reversal_series());
        let signal = signal.expect("expected a signal");
        assert_eq!(signal.kind, SignalKind::Buy);
        assert_eq!(signal.price, 74.5);
        match signal.evidence {
            Evidence::OversoldReversal { rsi } => assert!(rsi < 30.0, "rsi was {}", rsi),
            other => panic!("unexpected evidence {:?}", other),
        }
    }

    #[test]
    fn oversold_rsi_alone_is_not_enough() {
        let mut candles = reversal_series();
        // Break the engulfing pattern: the final candle no longer closes
        // above the previous open. RSI stays deep in oversold territory.
        let last = candles.len() - 1;
        candles[last].close = 71.0;
        assert_eq!(oversold_reversal().evaluate(&candles), None);
    }

    #[test]
    fn engulfing_pattern_alone_is_not_enough() {
        // Rising closes keep RSI at 100 even though the final two candle
        // bodies form an engulfing pair.
        let mut candles: Vec<Candle> = (0..15)
            .map(|i| {
                let open = 100.0 + i as f64 * 2.0;
                candle(open, open + 2.0, 1000.0)
            })
            .collect();
        candles.push(candle(127.0, 133.0, 1000.0));
        // prev: open 128 close 130 is bullish, so force a bearish prev body
        // that the last candle engulfs while closes keep rising.
        let prev = candles.len() - 2;
        candles[prev].open = 131.0;
        candles[prev].close = 130.0;
        assert_eq!(oversold_reversal().evaluate(&candles), None);
    }

    #[test]
    fn oversold_reversal_skips_short_series() {
        let candles = &reversal_series()[..10];
        assert_eq!(oversold_reversal().evaluate(candles), None);
    }

    #[test]
    fn band_breakout_buys_above_the_upper_band() {
        let signal = band_breakout().evaluate(&breakout_series(110.0));
        let signal = signal.expect("expected a signal");
        assert_eq!(signal.kind, SignalKind::Buy);
        assert_eq!(signal.price, 110.0);
        match signal.evidence {
            Evidence::BandBreakout { band, volume_ratio } => {
                assert!(band < 110.0);
                assert_eq!(volume_ratio, 2.0);
            }
            other => panic!("unexpected evidence {:?}", other),
        }
    }

    #[test]
    fn band_breakout_sells_below_the_lower_band() {
        let signal = band_breakout().evaluate(&breakout_series(90.0));
        let signal = signal.expect("expected a signal");
        assert_eq!(signal.kind, SignalKind::Sell);
    }

    #[test]
    fn band_breakout_requires_volume_confirmation() {
        let mut candles = breakout_series(110.0);
        let judged = candles.len() - 2;
        candles[judged].volume = 1200.0; // 1.2x average, below the 1.5 factor
        assert_eq!(band_breakout().evaluate(&candles), None);
    }

    #[test]
    fn band_breakout_ignores_in_band_closes() {
        assert_eq!(band_breakout().evaluate(&breakout_series(100.0)), None);
    }

    #[test]
    fn band_breakout_never_emits_both_sides() {
        // Sweep judged closes across a wide range; every emitted signal must
        // be a single side per evaluation.
        for close in [80.0, 90.0, 99.0, 100.0, 101.0, 110.0, 120.0] {
            let candles = breakout_series(close);
            let signals: Vec<Signal> = band_breakout().evaluate(&candles).into_iter().collect();
            assert!(signals.len() <= 1);
        }
    }

    #[test]
    fn band_breakout_skips_short_series() {
        let candles = &breakout_series(110.0)[..12];
        assert_eq!(band_breakout().evaluate(candles), None);
    }
}
