use crate::model::{Evidence, ScanReport, Signal};

/// Fixed sentence for a cycle with no hits. Only delivered when the
/// heartbeat policy is enabled.
pub const EMPTY_REPORT: &str = "No signals found this scan cycle.";

/// Renders a scan report as a single plain-text payload. The message is sent
/// without a parse mode, so symbol names with markup-significant characters
/// cannot corrupt delivery.
pub fn format_report(report: &ScanReport) -> String {
    if report.signals.is_empty() {
        return EMPTY_REPORT.to_string();
    }

    let symbol_width = report
        .signals
        .iter()
        .map(|s| s.symbol.len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(report.signals.len() + 1);
    lines.push(format!(
        "Scan report {} - {} signal(s)",
        report.timestamp.format("%Y-%m-%d %H:%M"),
        report.signals.len()
    ));
    for signal in &report.signals {
        lines.push(format_signal(signal, symbol_width));
    }
    lines.join("\n")
}

fn format_signal(signal: &Signal, symbol_width: usize) -> String {
    let kind = String::from(&signal.kind);
    let evidence = match &signal.evidence {
        Evidence::OversoldReversal { rsi } => {
            format!("RSI {:.1}, bullish engulfing", rsi)
        }
        Evidence::BandBreakout { band, volume_ratio } => {
            format!("band {:.6}, {:.1}x avg volume", band, volume_ratio)
        }
    };
    format!(
        "{:<width$}  {:<4}  @ {}  {}",
        signal.symbol,
        kind,
        signal.price,
        evidence,
        width = symbol_width
    )
}
