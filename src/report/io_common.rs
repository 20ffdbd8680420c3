use std::path::Path;

/// The last component of a path, or the path itself when it has none.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Rounds to two decimals, for the JSON reports.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// A share in percent, as displayed in tables: `12.5%`.
pub fn format_share(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

/// A signed difference of shares: `+2.0%`, `-13.3%`.
pub fn format_share_difference(difference: f64) -> String {
    format!("{:+.1}%", difference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("data/2023/results.md"), "results.md");
        assert_eq!(simplify_file_name("results.md"), "results.md");
        assert_eq!(simplify_file_name(".."), "..");
    }

    #[test]
    fn formatting() {
        assert_eq!(round2(4.1029), 4.1);
        assert_eq!(format_share(12.07), "12.1%");
        assert_eq!(format_share_difference(2.0), "+2.0%");
        assert_eq!(format_share_difference(-13.333), "-13.3%");
    }
}
