use std::env;
use std::str::FromStr;

use crate::constants;
use crate::model::{self, KlineInterval, ScanError};
use crate::strategy::Strategy;

/// Runtime configuration, read once at startup. The Telegram credential and
/// destination are required; every tunable falls back to the defaults in
/// `constants`.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    pub quote_asset: String,
    pub max_symbols: usize,
    pub interval_secs: u64,
    pub startup_delay_secs: u64,
    pub pacing_ms: u64,
    pub kline_interval: KlineInterval,
    pub notify_empty: bool, // Heartbeat message even when a cycle finds nothing.
    pub strategy: Strategy,
}

impl Config {
    pub fn from_env() -> model::Result<Config> {
        let telegram_bot_token = env::var("telegram_bot_token")?;
        let telegram_chat_id = env::var("telegram_chat_id")?
            .parse::<i64>()
            .map_err(|_| ScanError::InvalidConfig("telegram_chat_id must be an integer".into()))?;

        let kline_interval_raw = var_or("scan_kline_interval", "15m");
        let kline_interval = KlineInterval::parse(&kline_interval_raw).ok_or_else(|| {
            ScanError::InvalidConfig(format!(
                "scan_kline_interval has an unsupported value: {}",
                kline_interval_raw
            ))
        })?;

        let rsi_period = parsed_var_or("scan_rsi_period", constants::DEFAULT_RSI_PERIOD)?;
        let rsi_oversold = parsed_var_or("scan_rsi_oversold", constants::DEFAULT_RSI_OVERSOLD)?;
        let bollinger_period =
            parsed_var_or("scan_bollinger_period", constants::DEFAULT_BOLLINGER_PERIOD)?;
        let volume_factor = parsed_var_or("scan_volume_factor", constants::DEFAULT_VOLUME_FACTOR)?;
        let strategy = parse_strategy(
            &var_or("scan_strategy", "oversold-reversal"),
            rsi_period,
            rsi_oversold,
            bollinger_period,
            volume_factor,
        )?;

        Ok(Config {
            telegram_bot_token,
            telegram_chat_id,
            quote_asset: var_or("scan_quote_asset", constants::DEFAULT_QUOTE_ASSET),
            max_symbols: parsed_var_or("scan_max_symbols", constants::DEFAULT_MAX_SYMBOLS)?,
            interval_secs: parsed_var_or(
                "scan_interval_secs",
                constants::DEFAULT_SCAN_INTERVAL_SECS,
            )?,
            startup_delay_secs: parsed_var_or(
                "scan_startup_delay_secs",
                constants::DEFAULT_STARTUP_DELAY_SECS,
            )?,
            pacing_ms: parsed_var_or("scan_pacing_ms", constants::DEFAULT_PACING_MS)?,
            kline_interval,
            notify_empty: parsed_var_or("scan_notify_empty", false)?,
            strategy,
        })
    }
}

fn parse_strategy(
    name: &str,
    rsi_period: usize,
    rsi_oversold: f64,
    bollinger_period: usize,
    volume_factor: f64,
) -> model::Result<Strategy> {
    match name {
        "oversold-reversal" => Ok(Strategy::OversoldReversal {
            rsi_period,
            oversold: rsi_oversold,
        }),
        "band-breakout" => Ok(Strategy::BandBreakout {
            period: bollinger_period,
            num_std: constants::BOLLINGER_NUM_STD,
            volume_factor,
        }),
        other => Err(ScanError::InvalidConfig(format!(
            "scan_strategy has an unsupported value: {}",
            other
        ))),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_var_or<T: FromStr>(name: &str, default: T) -> model::Result<T> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            ScanError::InvalidConfig(format!("{} has an invalid value: {}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
