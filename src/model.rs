use std::{env::VarError, error::Error, fmt::Display};

use chrono::{DateTime, Local};
use telegram_bot_api::bot::APIResponseError;

use crate::http::client;

/// Structure representing a candle (OHLCV data). Chronological series,
/// most-recent last, immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub symbol: String, // Symbol of the trading pair.
    pub open: f64,      // Opening price.
    pub high: f64,      // Highest price.
    pub low: f64,       // Lowest price.
    pub close: f64,     // Closing price.
    pub volume: f64,    // Base-asset volume. Fractional on crypto markets.
    pub open_time: i64, // Candle open time, milliseconds since epoch.
}

/// A tradeable pair eligible for scanning.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub symbol: String,
    pub quote_volume: Option<f64>, // 24h quote volume, used for ranking.
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
    Sell,
}

impl From<&SignalKind> for String {
    fn from(value: &SignalKind) -> Self {
        match value {
            SignalKind::Buy => "BUY".to_string(),
            SignalKind::Sell => "SELL".to_string(),
        }
    }
}

/// Rule-specific evidence attached to a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Evidence {
    OversoldReversal { rsi: f64 },
    BandBreakout { band: f64, volume_ratio: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub symbol: String,
    pub kind: SignalKind,
    pub price: f64, // Close of the evaluated candle.
    pub evidence: Evidence,
}

/// One scan cycle's outcome. Rebuilt from scratch every cycle, never
/// persisted.
#[derive(Debug)]
pub struct ScanReport {
    pub timestamp: DateTime<Local>,
    pub signals: Vec<Signal>,
}

/// Supported kline intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KlineInterval {
    M15,
    H1,
    H4,
    D1,
}

impl KlineInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::M15 => "15m",
            KlineInterval::H1 => "1h",
            KlineInterval::H4 => "4h",
            KlineInterval::D1 => "1d",
        }
    }

    pub fn parse(s: &str) -> Option<KlineInterval> {
        match s {
            "15m" => Some(KlineInterval::M15),
            "1h" => Some(KlineInterval::H1),
            "4h" => Some(KlineInterval::H4),
            "1d" => Some(KlineInterval::D1),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug)]
pub enum ScanError {
    EnvVarNotSet(VarError),
    InvalidConfig(String),
    HttpError(client::RequestError),
    MalformedResponse(String),
    TelegramError(APIResponseError),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for ScanError {}

impl From<VarError> for ScanError {
    fn from(value: VarError) -> Self {
        Self::EnvVarNotSet(value)
    }
}

impl From<client::RequestError> for ScanError {
    fn from(value: client::RequestError) -> Self {
        Self::HttpError(value)
    }
}

impl From<APIResponseError> for ScanError {
    fn from(value: APIResponseError) -> Self {
        Self::TelegramError(value)
    }
}
