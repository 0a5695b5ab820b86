use url::Url;

/// Path suffixes that never hold crawlable HTML: images, video, audio,
/// archives, executables, and office documents.
pub const SKIP_EXTENSIONS: &[&str] = &[
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tiff",
    // Video
    ".mp4", ".avi", ".mov", ".wmv", ".mkv", ".webm", ".flv",
    // Audio
    ".mp3", ".wav", ".ogg", ".flac", ".m4a",
    // Archives
    ".zip", ".rar", ".7z", ".tar", ".gz", ".bz2",
    // Executables
    ".exe", ".msi", ".dmg", ".apk", ".bin",
    // Documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
];

/// Checks whether a URL path ends in a known non-document extension
/// (case-insensitive suffix match).
pub fn has_skipped_extension(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Decides whether a URL is eligible to fetch
///
/// A URL is admitted when all of the following hold:
/// - the scheme is HTTP or HTTPS,
/// - the path does not end in a known non-document extension,
/// - the host equals `base_host`, or (with `include_subdomains`) is a proper
///   subdomain `*.base_host` — both compared case-insensitively.
///
/// Pure function of (url, configuration); no side effects.
///
/// # Examples
///
/// ```
/// use namescout::url::admit;
/// use url::Url;
///
/// let url = Url::parse("https://project.cmd.hr.nl/team").unwrap();
/// assert!(admit(&url, "hr.nl", true));
/// assert!(!admit(&url, "hr.nl", false));
/// ```
pub fn admit(url: &Url, base_host: &str, include_subdomains: bool) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }

    if has_skipped_extension(url) {
        return false;
    }

    let host = match url.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };
    let base = base_host.to_lowercase();

    host == base || (include_subdomains && host.ends_with(&format!(".{}", base)))
}
