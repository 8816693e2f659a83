// Defaults for the scanner. Most of these can be overridden through the
// environment, see config.rs.

// Universe selection.
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";
pub const DEFAULT_MAX_SYMBOLS: usize = 100;
// Leveraged-token base suffixes excluded from the universe.
pub const LEVERAGED_SUFFIXES: &[&str] = &["UP", "DOWN"];

// Scheduling.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 900;
pub const DEFAULT_STARTUP_DELAY_SECS: u64 = 10;
pub const DEFAULT_PACING_MS: u64 = 200;
// Retry delay after a failed cycle, deliberately shorter than the interval.
pub const ERROR_BACKOFF_SECS: u64 = 60;

// Indicator parameters.
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;
pub const DEFAULT_VOLUME_FACTOR: f64 = 1.5;

// History length requested per symbol. Covers the RSI warm-up plus enough
// lookback for stable values, matching what the rules need.
pub const CANDLE_LIMIT: u32 = 64;
