//! File name extraction for display.

/// Strip every directory component from `path`.
///
/// Both `/` and `\` count as separators regardless of the host OS, since the
/// path may have been produced by a shell with the other convention. A path
/// ending in a separator yields an empty name.
pub fn display_name(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_paths() {
        assert_eq!(display_name("/home/u/report.pdf"), "report.pdf");
        assert_eq!(display_name("report.pdf"), "report.pdf");
        assert_eq!(display_name("/report.pdf"), "report.pdf");
    }

    #[test]
    fn test_windows_paths() {
        assert_eq!(display_name("C:\\Users\\u\\report.pdf"), "report.pdf");
        assert_eq!(display_name("\\\\server\\share\\a b.txt"), "a b.txt");
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(display_name("C:\\Users/u\\docs/report.pdf"), "report.pdf");
        assert_eq!(display_name("/mnt/c\\Users\\u\\x.iso"), "x.iso");
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(display_name(""), "");
        assert_eq!(display_name("/home/u/"), "");
    }
}
