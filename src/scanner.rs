use chrono::Local;
use tokio::time::{Duration, Instant, sleep, sleep_until};

use crate::config::Config;
use crate::constants;
use crate::model::{self, Candle, KlineInterval, ScanReport, SymbolInfo};
use crate::report;
use crate::universe;

/// Market-data capability the scanner needs. Implemented by the Binance
/// client; tests substitute in-memory fakes.
pub trait MarketData {
    async fn symbols(&self) -> model::Result<Vec<SymbolInfo>>;
    async fn candles(
        &self,
        symbol: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> model::Result<Vec<Candle>>;
}

/// Message-delivery capability.
pub trait Notifier {
    async fn notify(&self, text: &str) -> model::Result<()>;
}

/// The scan orchestrator. Collaborators are constructed once at startup and
/// injected; no state crosses cycle boundaries.
pub struct Scanner<M, N> {
    config: Config,
    market: M,
    notifier: N,
}

impl<M: MarketData, N: Notifier> Scanner<M, N> {
    pub fn new(config: Config, market: M, notifier: N) -> Scanner<M, N> {
        Scanner {
            config,
            market,
            notifier,
        }
    }

    /// Runs the scan loop until the process is terminated: startup delay,
    /// then one cycle per interval. A failed cycle is reported as a degraded
    /// operation alert and retried after a short backoff instead of the full
    /// interval.
    pub async fn run(&self) {
        sleep(Duration::from_secs(self.config.startup_delay_secs)).await;
        let interval = Duration::from_secs(self.config.interval_secs);

        let mut next_fire = Instant::now();
        loop {
            sleep_until(next_fire).await;
            match self.scan_cycle().await {
                Ok(report) => {
                    log::info!("scan cycle finished: {} signal(s)", report.signals.len());
                    next_fire = Instant::now() + interval;
                }
                Err(err) => {
                    log::error!("scan cycle failed: {}", err);
                    let alert = format!("Scanner degraded, retrying shortly: {}", err);
                    if let Err(send_err) = self.notifier.notify(&alert).await {
                        log::error!("failed to deliver degraded-operation alert: {}", send_err);
                    }
                    next_fire =
                        Instant::now() + Duration::from_secs(constants::ERROR_BACKOFF_SECS);
                }
            }
        }
    }

    /// One pass over the symbol universe. Per-symbol failures are logged and
    /// skipped; only a failure outside the per-symbol loop surfaces as `Err`.
    pub async fn scan_cycle(&self) -> model::Result<ScanReport> {
        let mut scan_report = ScanReport {
            timestamp: Local::now(),
            signals: Vec::new(),
        };

        let infos = match self.market.symbols().await {
            Ok(infos) => infos,
            Err(err) => {
                log::error!("failed to fetch symbol universe, skipping cycle: {}", err);
                return Ok(scan_report);
            }
        };
        let symbols =
            universe::filter_universe(infos, &self.config.quote_asset, self.config.max_symbols);
        if symbols.is_empty() {
            log::warn!("symbol universe is empty, skipping cycle");
            return Ok(scan_report);
        }
        log::info!("scanning {} symbols", symbols.len());

        for symbol in &symbols {
            match self
                .market
                .candles(symbol, self.config.kline_interval, constants::CANDLE_LIMIT)
                .await
            {
                Ok(candles) => {
                    if candles.len() < self.config.strategy.min_candles() {
                        log::debug!("not enough candles for {}, skipping", symbol);
                    } else if let Some(signal) = self.config.strategy.evaluate(&candles) {
                        log::info!("signal found for {}: {:?}", symbol, signal.kind);
                        scan_report.signals.push(signal);
                    }
                }
                Err(err) => {
                    log::error!("failed to fetch candles for {}: {}", symbol, err);
                }
            }
            // Fixed inter-request delay to respect the exchange's rate budget.
            sleep(Duration::from_millis(self.config.pacing_ms)).await;
        }

        if !scan_report.signals.is_empty() || self.config.notify_empty {
            let text = report::format_report(&scan_report);
            // At most one delivery attempt; the next cycle produces a fresh
            // report anyway.
            if let Err(err) = self.notifier.notify(&text).await {
                log::error!("failed to deliver scan report: {}", err);
            }
        }
        Ok(scan_report)
    }
}
