const KB_PER_MB: f64 = 1024.0;
const KB_PER_GB: f64 = 1024.0 * 1024.0;

/// Format a resident set size given in kilobytes, e.g. `10.0M` or `1.5G`
pub fn format_rss(rss_kb: f64) -> String {
    if rss_kb >= KB_PER_GB {
        format!("{:.1}G", rss_kb / KB_PER_GB)
    } else {
        format!("{:.1}M", rss_kb / KB_PER_MB)
    }
}
