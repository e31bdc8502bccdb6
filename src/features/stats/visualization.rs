//! Terminal visualization for statistics.

const FULL_BLOCK: char = '█';
const LIGHT_SHADE: char = '░';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_bar_chart(
    data: &[(String, usize)],
    max_label_width: usize,
    bar_width: usize,
) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let truncated_label = if label.chars().count() > max_label_width {
            let kept: String = label.chars().take(max_label_width.saturating_sub(3)).collect();
            format!("{kept}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = (*value as f64 / max_value as f64 * bar_width as f64) as usize;
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{truncated_label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a percentage (0-100) as a bar followed by the value.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let progress = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (progress * width as f64) as usize;
    let empty = width - filled;

    format!(
        "[{}{}] {percent:.1}%",
        FULL_BLOCK.to_string().repeat(filled),
        LIGHT_SHADE.to_string().repeat(empty)
    )
}
