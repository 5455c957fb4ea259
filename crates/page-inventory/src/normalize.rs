use std::collections::HashSet;

use url::Url;

/// Schemes whose values are not navigable resources.
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "data:"];

/// Resolves raw URL strings against `base`, drops fragments and duplicates.
///
/// First-seen order is kept. Values that do not parse are kept as written.
pub fn normalize_urls<I, S>(base: Option<&str>, raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = base.and_then(|value| Url::parse(value).ok());
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for value in raw {
        let value = value.as_ref().trim();
        if value.is_empty() || is_skipped(value) {
            continue;
        }
        let normalized = normalize_one(base.as_ref(), value);
        if seen.insert(normalized.clone()) {
            urls.push(normalized);
        }
    }
    urls
}

fn is_skipped(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

fn normalize_one(base: Option<&Url>, value: &str) -> String {
    let parsed = match base {
        Some(base) => base.join(value),
        None => Url::parse(value),
    };
    match parsed {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://shop.example.com/catalog/index.html";

    #[test]
    fn fragments_collapse_to_one_entry() {
        let urls = normalize_urls(
            Some(BASE),
            ["/item#top", "/item#reviews", "https://shop.example.com/item"],
        );
        assert_eq!(urls, vec!["https://shop.example.com/item"]);
    }

    #[test]
    fn relative_values_resolve_against_base() {
        let urls = normalize_urls(Some(BASE), ["page2.html", "//cdn.example.com/a.png"]);
        assert_eq!(
            urls,
            vec![
                "https://shop.example.com/catalog/page2.html",
                "https://cdn.example.com/a.png",
            ]
        );
    }

    #[test]
    fn scripts_and_blanks_are_skipped() {
        let urls = normalize_urls(Some(BASE), ["", "  ", "javascript:void(0)", "DATA:image/png;base64,AA"]);
        assert!(urls.is_empty());
    }

    #[test]
    fn unparseable_values_are_kept_raw() {
        let urls = normalize_urls(None, ["not a url", "not a url", "https://a.example/x#y"]);
        assert_eq!(urls, vec!["not a url", "https://a.example/x"]);
    }
}
