//! Time formatting helpers.

/// Format a remaining duration in seconds as `Xd Yh Zm`.
///
/// Leading zero units are dropped (`3h 5m`, `42m`); anything under a minute
/// reads `<1m`.
pub fn format_remaining(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "<1m".to_string()
    }
}
