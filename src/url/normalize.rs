use crate::UrlError;
use url::Url;

/// Normalizes a URL string into the form used as the frontier dedup key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Reject schemes other than HTTP and HTTPS
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
/// 5. Remove the query string entirely
/// 6. Remove a single trailing slash (except for the root path)
///
/// Two URLs differing only by query string, fragment, or trailing slash are
/// the same crawl node. The `url` crate lowercases scheme and host during
/// parsing, so case differences there never produce distinct keys; the path
/// keeps its original case for readability.
///
/// # Examples
///
/// ```
/// use namescout::url::normalize_url;
///
/// let url = normalize_url("https://example.com/People/?tab=2#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/People");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize(url)
}

/// Normalizes an already-parsed URL. See [`normalize_url`] for the rules.
pub fn normalize(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    url.set_query(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_strip_query() {
        let result = normalize_url("https://example.com/page?tab=2&sort=asc").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_strip_trailing_slash() {
        let result = normalize_url("https://example.com/page/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keep_root_slash() {
        let result = normalize_url("https://example.com/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_bare_host_gets_root_path() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_query_and_slash_collapse_to_same_key() {
        let a = normalize_url("https://example.com/team/?page=1").unwrap();
        let b = normalize_url("https://example.com/team").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_host_case_irrelevant() {
        let a = normalize_url("https://EXAMPLE.COM/page").unwrap();
        let b = normalize_url("https://example.com/page").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_path_case_preserved() {
        let result = normalize_url("https://example.com/About/Team").unwrap();
        assert_eq!(result.as_str(), "https://example.com/About/Team");
    }

    #[test]
    fn test_invalid_scheme() {
        let result = normalize_url("ftp://example.com/page");
        assert!(matches!(result.unwrap_err(), UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_malformed_url() {
        let result = normalize_url("not a url");
        assert!(matches!(result.unwrap_err(), UrlError::Parse(_)));
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = normalize_url("/people/jan");
        assert!(result.is_err());
    }
}
