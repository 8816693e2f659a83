use serde::Deserialize;

/// Subset of the Binance exchangeInfo payload the scanner cares about.
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<ExchangeSymbol>,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeSymbol {
    pub symbol: String,
    pub status: String, // "TRADING" for actively traded pairs.
}

/// One entry of the rolling 24h ticker statistics array. Numeric fields come
/// back as strings.
#[derive(Debug, Deserialize)]
pub struct DayTicker {
    pub symbol: String,
    #[serde(rename = "quoteVolume")]
    pub quote_volume: String,
}

/// Raw kline row. The endpoint returns a heterogeneous JSON array per candle:
/// open time, string-encoded prices/volumes, close time, then fields the
/// scanner ignores.
pub type KlineRow = (
    i64,    // open time (ms)
    String, // open
    String, // high
    String, // low
    String, // close
    String, // volume
    i64,    // close time (ms)
    String, // quote asset volume
    u64,    // number of trades
    String, // taker buy base volume
    String, // taker buy quote volume
    String, // unused
);
