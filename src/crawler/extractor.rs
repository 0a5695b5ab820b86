//! HTML extraction heuristics
//!
//! Turns a fetched page into candidate names, candidate personal photos, and
//! outbound links. The name heuristic knows nothing about semantics, only
//! capitalization shape; ordinary capitalized phrases will match, and the
//! validation stage exists precisely to filter those out later.

use crate::url::has_skipped_extension;
use crate::Finding;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Keywords that mark an image URL or alt text as a candidate personal photo
/// (case-insensitive substring match; "student" also covers "students")
const PHOTO_KEYWORDS: &[&str] = &[
    "student", "profile", "portrait", "foto", "photo", "person", "avatar", "headshot", "face",
];

/// Alt texts at or above this length are ignored for keyword matching
const MAX_ALT_LEN: usize = 100;

/// A candidate personal photo found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    /// Absolute image URL
    pub url: String,

    /// Alt text, if present
    pub alt: Option<String>,
}

/// Everything extracted from one fetched page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Candidate names, in document order, deduplicated per page
    pub names: Vec<String>,

    /// Candidate personal photos
    pub images: Vec<ImageCandidate>,

    /// Outbound links, resolved absolute, non-document extensions dropped
    pub links: Vec<Url>,
}

/// Parses HTML and extracts names, candidate images, and links
///
/// Relative image and link URLs are resolved against `final_url`, the
/// post-redirect URL of the page.
pub fn extract_page(html: &str, final_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        names: extract_names(&document),
        images: extract_images(&document, final_url),
        links: extract_links(&document, final_url),
    }
}

/// Pairs names and candidate images from one page into findings
///
/// Pairing policy, including its known imprecision:
/// - both present: full cross-product, one finding per (name, image) pair;
///   over-generation is deliberate, precision is recovered by validation
/// - only names: one finding per name, no image
/// - only images: one finding per image, no name
/// - neither: nothing
pub fn pair_findings(
    page_url: &Url,
    names: &[String],
    images: &[ImageCandidate],
) -> Vec<Finding> {
    let page_url = page_url.to_string();

    match (names.is_empty(), images.is_empty()) {
        (false, false) => names
            .iter()
            .flat_map(|name| {
                images.iter().map(|image| Finding {
                    page_url: page_url.clone(),
                    name: Some(name.clone()),
                    image_url: Some(image.url.clone()),
                    image_alt: image.alt.clone(),
                    name_validated: false,
                })
            })
            .collect(),

        (false, true) => names
            .iter()
            .map(|name| Finding {
                page_url: page_url.clone(),
                name: Some(name.clone()),
                image_url: None,
                image_alt: None,
                name_validated: false,
            })
            .collect(),

        (true, false) => images
            .iter()
            .map(|image| Finding {
                page_url: page_url.clone(),
                name: None,
                image_url: Some(image.url.clone()),
                image_alt: image.alt.clone(),
                name_validated: false,
            })
            .collect(),

        (true, true) => Vec::new(),
    }
}

/// Collects text of heading, paragraph, span, and list-item elements,
/// dedups exact text matches, and keeps the first name-shaped match per node
fn extract_names(document: &Html) -> Vec<String> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6, p, span, li")
        .expect("static selector is valid");

    let mut seen_texts = HashSet::new();
    let mut names = Vec::new();

    for element in document.select(&selector) {
        let text = element.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() || !seen_texts.insert(text.to_string()) {
            continue;
        }

        if let Some(name) = first_name_shaped(text) {
            names.push(name);
        }
    }

    names
}

/// Finds the first run of two to four consecutive capitalized word tokens
/// (Capital+lowercase, space-separated) in a text node
fn first_name_shaped(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut i = 0;
    while i < tokens.len() {
        if !is_capitalized_token(tokens[i]) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < tokens.len() && is_capitalized_token(tokens[j]) {
            j += 1;
        }

        let run = j - i;
        if run >= 2 {
            return Some(tokens[i..i + run.min(4)].join(" "));
        }
        i = j;
    }

    None
}

/// One uppercase letter followed by one or more lowercase letters
fn is_capitalized_token(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() && first.is_uppercase() => {}
        _ => return false,
    }

    let mut rest = chars.peekable();
    if rest.peek().is_none() {
        return false;
    }
    rest.all(|c| c.is_alphabetic() && c.is_lowercase())
}

/// Collects every `img` with a resolvable `src` and keeps the candidates
fn extract_images(document: &Html, base_url: &Url) -> Vec<ImageCandidate> {
    let selector = Selector::parse("img[src]").expect("static selector is valid");

    let mut images = Vec::new();
    for element in document.select(&selector) {
        let src = match element.value().attr("src") {
            Some(src) if !src.trim().is_empty() => src.trim(),
            _ => continue,
        };

        let absolute = match base_url.join(src) {
            Ok(url) => url.to_string(),
            Err(_) => continue,
        };

        let alt = element
            .value()
            .attr("alt")
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if is_photo_candidate(&absolute, alt.as_deref()) {
            images.push(ImageCandidate { url: absolute, alt });
        }
    }

    images
}

/// A candidate personal photo has a keyword in its absolute URL, or in its
/// alt text when the alt text is under 100 characters
fn is_photo_candidate(url: &str, alt: Option<&str>) -> bool {
    let url_lower = url.to_lowercase();
    if PHOTO_KEYWORDS.iter().any(|kw| url_lower.contains(kw)) {
        return true;
    }

    if let Some(alt) = alt {
        if alt.len() < MAX_ALT_LEN {
            let alt_lower = alt.to_lowercase();
            return PHOTO_KEYWORDS.iter().any(|kw| alt_lower.contains(kw));
        }
    }

    false
}

/// Extracts all followable links, resolved absolute against the final URL
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    let mut links = Vec::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                links.push(url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for hrefs that should be excluded: javascript/mailto/tel
/// schemes, data URIs, fragment-only anchors, unparseable hrefs, non-HTTP(S)
/// results, and known non-document extensions.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    if has_skipped_extension(&absolute) {
        return None;
    }

    Some(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://project.cmd.hr.nl/people").unwrap()
    }

    #[test]
    fn test_capitalized_token_shape() {
        assert!(is_capitalized_token("Jan"));
        assert!(is_capitalized_token("Bakker"));
        assert!(!is_capitalized_token("jan"));
        assert!(!is_capitalized_token("JAN"));
        assert!(!is_capitalized_token("J"));
        assert!(!is_capitalized_token("J4n"));
        assert!(!is_capitalized_token(""));
    }

    #[test]
    fn test_first_name_shaped_two_tokens() {
        assert_eq!(
            first_name_shaped("Contact Jan Bakker for details"),
            Some("Jan Bakker".to_string())
        );
    }

    #[test]
    fn test_first_name_shaped_caps_at_four() {
        assert_eq!(
            first_name_shaped("Anna Maria Van Der Berg spoke"),
            Some("Anna Maria Van Der".to_string())
        );
    }

    #[test]
    fn test_first_name_shaped_single_token_no_match() {
        assert_eq!(first_name_shaped("Welcome to our site"), None);
        assert_eq!(first_name_shaped("The quick brown fox"), None);
    }

    #[test]
    fn test_first_name_shaped_keeps_first_match() {
        assert_eq!(
            first_name_shaped("Jan Bakker and Piet Visser"),
            Some("Jan Bakker".to_string())
        );
    }

    #[test]
    fn test_extract_names_from_text_elements() {
        let html = r#"<html><body>
            <h2>Jan Bakker</h2>
            <p>Our coordinator is Sanne Visser this year.</p>
            <li>plain lowercase item</li>
        </body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.names, vec!["Jan Bakker", "Sanne Visser"]);
    }

    #[test]
    fn test_extract_names_dedups_exact_text() {
        let html = r#"<html><body>
            <span>Jan Bakker</span>
            <span>Jan Bakker</span>
        </body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.names, vec!["Jan Bakker"]);
    }

    #[test]
    fn test_image_candidate_by_url_keyword() {
        let html = r#"<html><body><img src="/media/studentfoto1.jpg"></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.images.len(), 1);
        assert_eq!(
            page.images[0].url,
            "https://project.cmd.hr.nl/media/studentfoto1.jpg"
        );
    }

    #[test]
    fn test_image_candidate_by_alt_keyword() {
        let html = r#"<html><body><img src="/media/x123.jpg" alt="portrait of a lecturer"></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.images.len(), 1);
        assert_eq!(page.images[0].alt.as_deref(), Some("portrait of a lecturer"));
    }

    #[test]
    fn test_long_alt_text_ignored() {
        let long_alt = format!("photo {}", "x".repeat(120));
        let html = format!(r#"<html><body><img src="/media/x123.jpg" alt="{}"></body></html>"#, long_alt);
        let page = extract_page(&html, &base_url());
        assert!(page.images.is_empty());
    }

    #[test]
    fn test_non_candidate_image_dropped() {
        let html = r#"<html><body><img src="/media/banner.jpg" alt="decorative wave"></body></html>"#;
        let page = extract_page(html, &base_url());
        assert!(page.images.is_empty());
    }

    #[test]
    fn test_keyword_match_case_insensitive() {
        let html = r#"<html><body><img src="/media/TeamPHOTO.jpg"></body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.images.len(), 1);
    }

    #[test]
    fn test_pair_one_name_one_image() {
        let names = vec!["Jan Bakker".to_string()];
        let images = vec![ImageCandidate {
            url: "https://hr.nl/foto.jpg".to_string(),
            alt: None,
        }];
        let findings = pair_findings(&base_url(), &names, &images);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name.as_deref(), Some("Jan Bakker"));
        assert_eq!(findings[0].image_url.as_deref(), Some("https://hr.nl/foto.jpg"));
        assert!(!findings[0].name_validated);
    }

    #[test]
    fn test_pair_cross_product() {
        let names = vec!["Jan Bakker".to_string(), "Sanne Visser".to_string()];
        let images = vec![
            ImageCandidate {
                url: "https://hr.nl/foto1.jpg".to_string(),
                alt: None,
            },
            ImageCandidate {
                url: "https://hr.nl/foto2.jpg".to_string(),
                alt: Some("profile".to_string()),
            },
        ];
        let findings = pair_findings(&base_url(), &names, &images);

        assert_eq!(findings.len(), 4);
        // Every (name, image) pair appears exactly once
        for name in &names {
            for image in &images {
                assert_eq!(
                    findings
                        .iter()
                        .filter(|f| f.name.as_deref() == Some(name)
                            && f.image_url.as_deref() == Some(&image.url))
                        .count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_pair_names_only() {
        let names = vec!["Jan Bakker".to_string()];
        let findings = pair_findings(&base_url(), &names, &[]);

        assert_eq!(findings.len(), 1);
        assert!(findings[0].image_url.is_none());
        assert!(findings[0].image_alt.is_none());
    }

    #[test]
    fn test_pair_images_only() {
        let images = vec![ImageCandidate {
            url: "https://hr.nl/avatar.png".to_string(),
            alt: None,
        }];
        let findings = pair_findings(&base_url(), &[], &images);

        assert_eq!(findings.len(), 1);
        assert!(findings[0].name.is_none());
    }

    #[test]
    fn test_pair_nothing() {
        assert!(pair_findings(&base_url(), &[], &[]).is_empty());
    }

    #[test]
    fn test_no_findings_for_plain_page() {
        let html = r#"<html><body>
            <p>welcome to the archive</p>
            <img src="/media/banner.jpg" alt="wave">
        </body></html>"#;
        let page = extract_page(html, &base_url());
        let findings = pair_findings(&base_url(), &page.names, &page.images);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_extract_links_resolved_absolute() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="https://other.org/page">Other</a>
        </body></html>"#;
        let page = extract_page(html, &base_url());
        let links: Vec<&str> = page.links.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            links,
            vec!["https://project.cmd.hr.nl/about", "https://other.org/page"]
        );
    }

    #[test]
    fn test_extract_links_drops_special_schemes() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:jan@hr.nl">Mail</a>
            <a href="tel:+3110123456">Call</a>
            <a href="#top">Top</a>
            <a href="data:text/html,hi">Data</a>
        </body></html>"##;
        let page = extract_page(html, &base_url());
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_extract_links_drops_binary_extensions() {
        let html = r#"<html><body>
            <a href="/report.pdf">Report</a>
            <a href="/photo.JPG">Photo</a>
            <a href="/team">Team</a>
        </body></html>"#;
        let page = extract_page(html, &base_url());
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].path(), "/team");
    }
}
