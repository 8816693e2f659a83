//! Pure indicator math over chronological price series.
//!
//! Every function returns a series aligned to its input; entries whose
//! trailing window is not yet full are NAN. Callers are responsible for
//! checking the minimum series length before trusting the latest value.

/// Trailing simple moving average of width `window`.
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let sum: f64 = values[i + 1 - window..=i].iter().sum();
        out[i] = sum / window as f64;
    }
    out
}

/// Trailing windowed standard deviation, population convention (divide by
/// the window size, not window - 1). The band-breakout thresholds are
/// calibrated against this convention.
pub fn std_deviation(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window as f64;
        out[i] = variance.sqrt();
    }
    out
}

/// Bollinger band values, one entry per input candle.
#[derive(Debug)]
pub struct Bands {
    pub sma: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger_bands(values: &[f64], period: usize, num_std: f64) -> Bands {
    let sma = simple_moving_average(values, period);
    let std = std_deviation(values, period);
    let upper = sma
        .iter()
        .zip(&std)
        .map(|(m, s)| m + num_std * s)
        .collect();
    let lower = sma
        .iter()
        .zip(&std)
        .map(|(m, s)| m - num_std * s)
        .collect();
    Bands { sma, upper, lower }
}

/// Relative Strength Index with SMA-smoothed gains and losses. The first
/// `period` entries are NAN. A window with no losses yields 100 instead of
/// dividing by zero.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let mut gains = vec![0.0; values.len()];
    let mut losses = vec![0.0; values.len()];
    for i in 1..values.len() {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    for i in period..values.len() {
        let from = i + 1 - period;
        let mean_gain = gains[from..=i].iter().sum::<f64>() / period as f64;
        let mean_loss = losses[from..=i].iter().sum::<f64>() / period as f64;
        out[i] = if mean_loss == 0.0 {
            100.0
        } else {
            let rs = mean_gain / mean_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
    }
    out
}

/// Exponential moving average with smoothing factor 2/(window+1), seeded by
/// the simple average of the first `window` values.
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let multiplier = 2.0 / (window as f64 + 1.0);
    let seed = values[..window].iter().sum::<f64>() / window as f64;
    out[window - 1] = seed;
    let mut prev = seed;
    for i in window..values.len() {
        prev = values[i] * multiplier + prev * (1.0 - multiplier);
        out[i] = prev;
    }
    out
}
