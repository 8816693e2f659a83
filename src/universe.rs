use std::collections::HashMap;

use crate::constants;
use crate::marketdata::response::ExchangeSymbol;
use crate::model::SymbolInfo;

/// Joins exchange metadata with 24h quote volumes, keeping only actively
/// traded pairs. Input order is preserved.
pub fn merge_universe(
    exchange_symbols: Vec<ExchangeSymbol>,
    volumes: &HashMap<String, f64>,
) -> Vec<SymbolInfo> {
    exchange_symbols
        .into_iter()
        .filter(|s| s.status == "TRADING")
        .map(|s| {
            let quote_volume = volumes.get(&s.symbol).copied();
            SymbolInfo {
                symbol: s.symbol,
                quote_volume,
            }
        })
        .collect()
}

/// Applies the eligibility filters and ranking: quote-asset suffix match,
/// leveraged-token exclusion, descending sort by 24h quote volume, then a cap
/// at `max_count` entries.
pub fn filter_universe(
    infos: Vec<SymbolInfo>,
    quote_asset: &str,
    max_count: usize,
) -> Vec<String> {
    let mut eligible: Vec<SymbolInfo> = infos
        .into_iter()
        .filter(|info| is_eligible(&info.symbol, quote_asset))
        .collect();

    // Stable sort keeps input order for pairs with equal volume; pairs with
    // no volume figure rank last.
    eligible.sort_by(|a, b| {
        let va = a.quote_volume.unwrap_or(f64::MIN);
        let vb = b.quote_volume.unwrap_or(f64::MIN);
        vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
    });

    eligible.truncate(max_count);
    eligible.into_iter().map(|info| info.symbol).collect()
}

fn is_eligible(symbol: &str, quote_asset: &str) -> bool {
    let Some(base) = symbol.strip_suffix(quote_asset) else {
        return false;
    };
    if base.is_empty() {
        return false;
    }
    !constants::LEVERAGED_SUFFIXES
        .iter()
        .any(|suffix| base.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(symbol: &str, quote_volume: Option<f64>) -> SymbolInfo {
        SymbolInfo {
            symbol: symbol.to_string(),
            quote_volume,
        }
    }

    #[test]
    fn merge_drops_pairs_that_are_not_trading() {
        let exchange_symbols = vec![
            ExchangeSymbol {
                symbol: "BTCUSDT".to_string(),
                status: "TRADING".to_string(),
            },
            ExchangeSymbol {
                symbol: "VENUSDT".to_string(),
                status: "BREAK".to_string(),
            },
        ];
        let volumes = HashMap::from([("BTCUSDT".to_string(), 5.0)]);
        let merged = merge_universe(exchange_symbols, &volumes);
        assert_eq!(merged, vec![info("BTCUSDT", Some(5.0))]);
    }

    #[test]
    fn filter_excludes_leveraged_tokens_and_foreign_quotes() {
        let infos = vec![
            info("BTCUSDT", Some(100.0)),
            info("ETHUPUSDT", Some(900.0)),
            info("ETHDOWNUSDT", Some(900.0)),
            info("ETHBTC", Some(900.0)),
            info("ETHUSDT", Some(200.0)),
        ];
        let out = filter_universe(infos, "USDT", 10);
        assert_eq!(out, vec!["ETHUSDT", "BTCUSDT"]);
    }

    #[test]
    fn filter_ranks_by_volume_and_caps_the_count() {
        let infos = vec![
            info("AUSDT", Some(10.0)),
            info("BUSDT", Some(30.0)),
            info("CUSDT", Some(20.0)),
        ];
        let out = filter_universe(infos, "USDT", 2);
        assert_eq!(out, vec!["BUSDT", "CUSDT"]);
    }

    #[test]
    fn missing_volume_ranks_last_and_ties_keep_input_order() {
        let infos = vec![
            info("AUSDT", None),
            info("BUSDT", Some(5.0)),
            info("CUSDT", Some(5.0)),
        ];
        let out = filter_universe(infos, "USDT", 10);
        assert_eq!(out, vec!["BUSDT", "CUSDT", "AUSDT"]);
    }

    #[test]
    fn bare_quote_asset_is_not_a_pair() {
        let out = filter_universe(vec![info("USDT", Some(1.0))], "USDT", 10);
        assert!(out.is_empty());
    }
}
