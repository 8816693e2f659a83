use std::collections::HashMap;

use super::response;
use crate::http::client;
use crate::model::{self, Candle, KlineInterval, ScanError, SymbolInfo};
use crate::scanner::MarketData;
use crate::universe;

// Base URL for the Binance public market-data API.
const BASE_URL: &str = "https://api.binance.com";

/// Client for the exchange's public market-data endpoints. None of them
/// require credentials.
pub struct BinanceClient {
    base_url: String,
}

impl BinanceClient {
    pub fn new() -> BinanceClient {
        BinanceClient {
            base_url: BASE_URL.to_string(),
        }
    }

    /// Fetches exchange metadata for every listed pair.
    async fn exchange_info(&self) -> model::Result<response::ExchangeInfo> {
        let resp = client::get::<response::ExchangeInfo>(
            format!("{}/api/v3/exchangeInfo", self.base_url).as_str(),
            HashMap::new(),
        )
        .await?;
        Ok(resp)
    }

    /// Fetches rolling 24h ticker statistics for every pair.
    async fn day_tickers(&self) -> model::Result<Vec<response::DayTicker>> {
        let resp = client::get::<Vec<response::DayTicker>>(
            format!("{}/api/v3/ticker/24hr", self.base_url).as_str(),
            HashMap::new(),
        )
        .await?;
        Ok(resp)
    }
}

// Converts one raw kline row into a candle. Price and volume fields arrive
// string-encoded.
fn candle_from_row(symbol: &str, row: &response::KlineRow) -> model::Result<Candle> {
    Ok(Candle {
        symbol: symbol.to_string(),
        open: parse_field(&row.1, symbol)?,
        high: parse_field(&row.2, symbol)?,
        low: parse_field(&row.3, symbol)?,
        close: parse_field(&row.4, symbol)?,
        volume: parse_field(&row.5, symbol)?,
        open_time: row.0,
    })
}

fn parse_field(raw: &str, symbol: &str) -> model::Result<f64> {
    raw.parse::<f64>().map_err(|_| {
        ScanError::MalformedResponse(format!("bad numeric field {:?} for {}", raw, symbol))
    })
}

impl MarketData for BinanceClient {
    /// Lists actively traded pairs with their 24h quote volumes.
    async fn symbols(&self) -> model::Result<Vec<SymbolInfo>> {
        let info = self.exchange_info().await?;
        let tickers = self.day_tickers().await?;

        let mut volumes: HashMap<String, f64> = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            if let Ok(volume) = ticker.quote_volume.parse::<f64>() {
                volumes.insert(ticker.symbol, volume);
            }
        }

        Ok(universe::merge_universe(info.symbols, &volumes))
    }

    /// Fetches the most recent `limit` klines for one pair, oldest first.
    async fn candles(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> model::Result<Vec<Candle>> {
        let limit = limit.to_string();
        let rows = client::get::<Vec<response::KlineRow>>(
            format!("{}/api/v3/klines", self.base_url).as_str(),
            HashMap::from([
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ]),
        )
        .await?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            candles.push(candle_from_row(symbol, row)?);
        }
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_from_row_parses_string_fields() {
        let row: response::KlineRow = (
            1700000000000,
            "42000.1".to_string(),
            "42100.5".to_string(),
            "41900.0".to_string(),
            "42050.3".to_string(),
            "12.5".to_string(),
            1700000899999,
            "525000.0".to_string(),
            1000,
            "6.0".to_string(),
            "252000.0".to_string(),
            "0".to_string(),
        );
        let candle = candle_from_row("BTCUSDT", &row).unwrap();
        assert_eq!(candle.symbol, "BTCUSDT");
        assert_eq!(candle.open, 42000.1);
        assert_eq!(candle.close, 42050.3);
        assert_eq!(candle.volume, 12.5);
        assert_eq!(candle.open_time, 1700000000000);
    }

    #[test]
    fn candle_from_row_rejects_garbage() {
        let row: response::KlineRow = (
            0,
            "not-a-number".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
            0,
            "0".to_string(),
            0,
            "0".to_string(),
            "0".to_string(),
            "0".to_string(),
        );
        let err = candle_from_row("BTCUSDT", &row).unwrap_err();
        assert!(matches!(err, ScanError::MalformedResponse(_)));
    }
}
