//! Upload filename sanitizing.

use unicode_normalization::UnicodeNormalization;

const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9", "LPT1",
    "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Reduces a client-supplied filename to something safe to join onto the
/// upload directory.
///
/// The name is NFKD-decomposed and whatever is still non-ASCII is dropped,
/// so accented letters keep their base letter. `/` and whitespace collapse
/// into single underscores, and anything outside `[A-Za-z0-9_.-]` is
/// removed. Leading and trailing dots and underscores are stripped, so the
/// result can never name a parent directory or a hidden file. Device names
/// such as `CON` get a leading underscore on every platform. May return an
/// empty string; callers must reject that.
pub fn secure_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace('/', " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let mut result = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();

    let stem = result.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if WINDOWS_DEVICE_FILES.contains(&stem.as_str()) {
        result.insert(0, '_');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::secure_filename;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(secure_filename("a.png"), "a.png");
        assert_eq!(secure_filename("scan-01_final.JPG"), "scan-01_final.JPG");
    }

    #[test]
    fn joins_whitespace_with_underscores() {
        assert_eq!(secure_filename("My cool   movie.mov"), "My_cool_movie.mov");
    }

    #[test]
    fn strips_path_traversal() {
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(secure_filename("dir\\scan.png"), "dirscan.png");
        assert_eq!(secure_filename("/abs/path/x.png"), "abs_path_x.png");
    }

    #[test]
    fn removes_unsafe_characters() {
        assert_eq!(secure_filename("x<y>|z?.png"), "xyz.png");
    }

    #[test]
    fn transliterates_accents() {
        assert_eq!(secure_filename("röntgen.png"), "rontgen.png");
        assert_eq!(secure_filename("Ångström scan.jpg"), "Angstrom_scan.jpg");
        assert_eq!(secure_filename("ﬁle.png"), "file.png");
    }

    #[test]
    fn prefixes_windows_device_names() {
        assert_eq!(secure_filename("con.txt"), "_con.txt");
        assert_eq!(secure_filename("NUL"), "_NUL");
    }

    #[test]
    fn may_sanitize_to_nothing() {
        assert_eq!(secure_filename(""), "");
        assert_eq!(secure_filename("../.."), "");
        assert_eq!(secure_filename("日本"), "");
    }
}
