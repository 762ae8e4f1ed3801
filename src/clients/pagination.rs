//! Pagination metadata parsed from list responses.
//!
//! Invoiced paginates list endpoints with page numbers. Each list response
//! carries an RFC 5988 `Link` header with `self`, `first`, `last` and, where
//! applicable, `next` and `previous` relations, plus an `X-Total-Count` header.

use std::collections::HashMap;

/// Navigation state of one list response.
///
/// Created once per response and never mutated.
///
/// # Example
///
/// ```rust
/// use invoiced::clients::ListMetadata;
///
/// let link = r#"<https://api.invoiced.com/customers?per_page=25&page=1>; rel="self", <https://api.invoiced.com/customers?per_page=25&page=1>; rel="first", <https://api.invoiced.com/customers?per_page=25&page=4>; rel="last""#;
/// let metadata = ListMetadata::new(Some(link), Some("87"));
///
/// assert_eq!(metadata.total_count(), 87);
/// assert_eq!(metadata.first_page(), Some(1));
/// assert_eq!(metadata.last_page(), Some(4));
/// assert_eq!(metadata.next_page(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListMetadata {
    total_count: u64,
    links: HashMap<String, String>,
}

impl ListMetadata {
    /// Builds metadata from the raw `Link` and total-count header values.
    ///
    /// A missing or unparsable count yields 0.
    #[must_use]
    pub fn new(link_header: Option<&str>, total_count: Option<&str>) -> Self {
        Self {
            total_count: total_count
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            links: link_header.map(Self::parse_link_header).unwrap_or_default(),
        }
    }

    /// Parses a `Link` header into a map of relation name to URL.
    ///
    /// The header format is `<url>; rel="name", <url>; rel="name"`. Entries
    /// without a `rel` parameter are ignored.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> HashMap<String, String> {
        let mut links = HashMap::new();

        for link in header_value.split(',') {
            let link = link.trim();

            let rel = link.split(';').skip(1).find_map(|part| {
                let part = part.trim();
                part.strip_prefix("rel=").map(|rel| rel.trim_matches('"'))
            });

            let url = link
                .split(';')
                .next()
                .map(|s| s.trim().trim_start_matches('<').trim_end_matches('>'));

            if let (Some(rel), Some(url)) = (rel, url) {
                // A rel value may hold several space-separated relation types
                for name in rel.split_whitespace() {
                    links.insert(name.to_string(), url.to_string());
                }
            }
        }

        links
    }

    /// Returns the total number of results across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns every parsed relation.
    #[must_use]
    pub const fn links(&self) -> &HashMap<String, String> {
        &self.links
    }

    /// Returns the URL of a relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&str> {
        self.links.get(rel).map(String::as_str)
    }

    /// Returns the `page` query parameter of a relation's URL.
    #[must_use]
    pub fn page(&self, rel: &str) -> Option<u64> {
        self.link(rel)
            .and_then(|url| extract_query_param(url, "page"))
            .and_then(|page| page.parse().ok())
    }

    /// Page number of the `first` relation.
    #[must_use]
    pub fn first_page(&self) -> Option<u64> {
        self.page("first")
    }

    /// Page number of the `last` relation.
    #[must_use]
    pub fn last_page(&self) -> Option<u64> {
        self.page("last")
    }

    /// Page number of the `next` relation.
    #[must_use]
    pub fn next_page(&self) -> Option<u64> {
        self.page("next")
    }

    /// Page number of the `previous` relation (`prev` is accepted too).
    #[must_use]
    pub fn prev_page(&self) -> Option<u64> {
        self.page("previous").or_else(|| self.page("prev"))
    }

    /// Page number of the `self` relation.
    #[must_use]
    pub fn self_page(&self) -> Option<u64> {
        self.page("self")
    }

    /// Returns `true` if a `next` relation is present.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.links.contains_key("next")
    }
}

/// Extracts a parameter from a URL's query string.
fn extract_query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let query_start = url.find('?')?;
    let query = &url[query_start + 1..];
    let query = query.split('#').next().unwrap_or(query);

    query.split('&').find_map(|param| {
        let mut parts = param.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(value),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER_LINKS: &str = r#"<https://api.invoiced.com/customers?per_page=25&page=1>; rel="self", <https://api.invoiced.com/customers?per_page=25&page=1>; rel="first", <https://api.invoiced.com/customers?per_page=25&page=1>; rel="last""#;

    #[test]
    fn test_single_page_listing() {
        let metadata = ListMetadata::new(Some(CUSTOMER_LINKS), Some("15"));

        assert_eq!(metadata.total_count(), 15);
        assert_eq!(metadata.self_page(), Some(1));
        assert_eq!(metadata.first_page(), Some(1));
        assert_eq!(metadata.last_page(), Some(1));
        assert_eq!(metadata.next_page(), None);
        assert_eq!(metadata.prev_page(), None);
        assert!(!metadata.has_next_page());
        assert_eq!(metadata.links().len(), 3);
    }

    #[test]
    fn test_middle_page_listing() {
        let link = r#"<https://api.invoiced.com/invoices?page=3>; rel="self", <https://api.invoiced.com/invoices?page=1>; rel="first", <https://api.invoiced.com/invoices?page=2>; rel="previous", <https://api.invoiced.com/invoices?page=4>; rel="next", <https://api.invoiced.com/invoices?page=9>; rel="last""#;
        let metadata = ListMetadata::new(Some(link), Some("220"));

        assert_eq!(metadata.self_page(), Some(3));
        assert_eq!(metadata.prev_page(), Some(2));
        assert_eq!(metadata.next_page(), Some(4));
        assert_eq!(metadata.last_page(), Some(9));
        assert!(metadata.has_next_page());
        assert_eq!(
            metadata.link("next"),
            Some("https://api.invoiced.com/invoices?page=4")
        );
    }

    #[test]
    fn test_prev_alias() {
        let link = r#"<https://api.invoiced.com/plans?page=1>; rel="prev""#;
        let metadata = ListMetadata::new(Some(link), None);
        assert_eq!(metadata.prev_page(), Some(1));
    }

    #[test]
    fn test_missing_headers_default() {
        let metadata = ListMetadata::new(None, None);
        assert_eq!(metadata.total_count(), 0);
        assert!(metadata.links().is_empty());
        assert_eq!(metadata.first_page(), None);
        assert_eq!(metadata, ListMetadata::default());
    }

    #[test]
    fn test_unparsable_count_is_zero() {
        assert_eq!(ListMetadata::new(None, Some("many")).total_count(), 0);
        assert_eq!(ListMetadata::new(None, Some(" 7 ")).total_count(), 7);
    }

    #[test]
    fn test_relation_without_page_param() {
        let link = r#"<https://api.invoiced.com/events>; rel="first""#;
        let metadata = ListMetadata::new(Some(link), None);
        assert_eq!(metadata.link("first"), Some("https://api.invoiced.com/events"));
        assert_eq!(metadata.first_page(), None);
    }

    #[test]
    fn test_entries_without_rel_are_ignored() {
        let links = ListMetadata::parse_link_header("<https://a.example/x?page=1>, garbage");
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_query_param() {
        assert_eq!(
            extract_query_param("https://x/y?per_page=25&page=3", "page"),
            Some("3")
        );
        assert_eq!(extract_query_param("https://x/y?page=2#frag", "page"), Some("2"));
        assert_eq!(extract_query_param("https://x/y?per_page=25", "page"), None);
        assert_eq!(extract_query_param("https://x/y", "page"), None);
    }
}
