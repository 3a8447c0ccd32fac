//! Plain-text summary of the hottest call paths.

use crate::aggregator::metrics::HotNode;

/// Render a table of hot nodes with a bar per row
pub fn generate_text_summary(hot_nodes: &[HotNode], total_time: u64) -> String {
    let mut lines = Vec::new();

    lines.push("  HOTTEST CALL PATHS".to_string());
    lines.push(format!("  Total time: {}", total_time));
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━┳━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<42} ┃ {:^12} ┃ {:^12} ┃ {:^7} ┃",
        "Function (depth)", "INCLUSIVE", "SELF", "%"
    ));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━╋━━━━━━━━━┫".to_string());

    for hot in hot_nodes {
        let name = format!("{} ({})", hot.function, hot.depth);
        lines.push(format!(
            "  ┃ {:<42} ┃ {:>12} ┃ {:>12} ┃ {:>6.1}% ┃",
            truncate_front(&name, 42),
            hot.inclusive_time,
            hot.self_time,
            hot.percentage
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━┻━━━━━━━━━┛".to_string());

    lines.push(String::new());
    for hot in hot_nodes.iter().take(5) {
        let bar = "█".repeat((hot.percentage / 2.0) as usize); // Max 50 chars
        lines.push(format!(
            "  └─ {:<24} {:50} {:>5.1}%",
            truncate_front(&hot.function, 24),
            bar,
            hot.percentage
        ));
    }

    lines.join("\n")
}

/// Keep the last `width` characters, marking the cut with "..."
fn truncate_front(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width {
        return s.to_string();
    }
    let tail: String = s.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}
