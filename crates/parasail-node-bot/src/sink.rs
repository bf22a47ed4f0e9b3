/*
[INPUT]:  Node statistics and remaining time until the next check-in
[OUTPUT]: Display strings and the StatusSink seam used by the scheduler
[POS]:    Presentation boundary between the scheduler and the dashboard
[UPDATE]: When changing the stats panel content or countdown format
*/

use std::time::Duration;

use chrono::Local;
use parasail_adapter::NodeStats;

/// Receives display updates from the scheduler.
///
/// Log lines travel through `tracing`; the dashboard installs a writer that
/// appends them to its log panel.
pub trait StatusSink: Send + Sync {
    fn publish_stats(&self, stats: &NodeStats);

    fn publish_countdown(&self, countdown: &str);
}

/// Countdown line, rounding partial seconds up so zero is shown only at the deadline
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.as_millis().div_ceil(1000) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("Next Check-in: {hours:02}:{minutes:02}:{seconds:02}")
}

/// Stats panel lines
pub fn format_stats(stats: &NodeStats) -> Vec<String> {
    let last_checkin = stats
        .last_checkin_at()
        .map(|at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "N/A".to_string());

    vec![
        format!("Has Node: {}", if stats.has_node { "Yes" } else { "No" }),
        format!("Node Address: {}", stats.node_address),
        format!("Points: {}", stats.points.normalize()),
        format!(
            "Pending Rewards: {}",
            stats
                .pending_rewards
                .map(|value| value.normalize().to_string())
                .unwrap_or_else(|| "None".to_string())
        ),
        format!(
            "Total Distributed: {}",
            stats
                .total_distributed
                .map(|value| value.normalize().to_string())
                .unwrap_or_else(|| "None".to_string())
        ),
        format!("Last Check-in: {last_checkin}"),
        format!("Card Count: {}", stats.card_count),
    ]
}

/// Sink for headless mode: everything goes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn publish_stats(&self, stats: &NodeStats) {
        tracing::info!("Node stats: {}", format_stats(stats).join(" | "));
    }

    fn publish_countdown(&self, countdown: &str) {
        tracing::trace!("{countdown}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn stats() -> NodeStats {
        NodeStats {
            has_node: true,
            node_address: "0xnode".to_string(),
            points: "1250.50".parse().unwrap(),
            pending_rewards: None,
            total_distributed: Some(Decimal::from(3)),
            last_checkin_time: None,
            card_count: 2,
        }
    }

    #[test]
    fn test_format_countdown_full_period() {
        assert_eq!(
            format_countdown(Duration::from_secs(24 * 60 * 60)),
            "Next Check-in: 24:00:00"
        );
        assert_eq!(
            format_countdown(Duration::from_secs(3661)),
            "Next Check-in: 01:01:01"
        );
    }

    #[test]
    fn test_format_countdown_rounds_up_partial_seconds() {
        assert_eq!(
            format_countdown(Duration::from_millis(1)),
            "Next Check-in: 00:00:01"
        );
        assert_eq!(format_countdown(Duration::ZERO), "Next Check-in: 00:00:00");
    }

    #[test]
    fn test_format_stats_lines() {
        let lines = format_stats(&stats());
        assert_eq!(
            lines,
            vec![
                "Has Node: Yes",
                "Node Address: 0xnode",
                "Points: 1250.5",
                "Pending Rewards: None",
                "Total Distributed: 3",
                "Last Check-in: N/A",
                "Card Count: 2",
            ]
        );
    }

    #[test]
    fn test_format_stats_renders_last_checkin() {
        let mut stats = stats();
        stats.last_checkin_time = Some(1_700_000_000);
        let lines = format_stats(&stats);
        assert!(lines[5].starts_with("Last Check-in: 20"));
    }
}
