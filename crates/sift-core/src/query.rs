//! Query translation: user search intent → backend request parameters.
//!
//! Pure and total. The client never validates regex syntax; an invalid
//! pattern is the backend's error to report (surfaced verbatim, prior
//! results kept).

use serde::{Deserialize, Serialize};

/// How the backend should interpret the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Phrase matching against the full-text index.
    #[default]
    Standard,
    /// Text is a regular expression, evaluated by the backend.
    RegexAdvanced,
    /// Exhaustive substring scan (backend-defined, slower).
    DeepSubstring,
}

impl SearchMode {
    /// Wire tag for the `mode` query parameter.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Standard => "default",
            Self::RegexAdvanced => "regex",
            Self::DeepSubstring => "deep",
        }
    }
}

/// One search invocation. Constructed per search, never persisted.
///
/// The mode always travels with the text; it is never inferred after the
/// fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}

/// Backend request parameters for `/search`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub q: String,
    pub mode: &'static str,
}

/// Map a query to backend request parameters.
///
/// Text is passed verbatim in every mode; regex patterns in particular are
/// not escaped or pre-validated here.
pub fn translate(query: &SearchQuery) -> RequestParams {
    RequestParams {
        q: query.text.clone(),
        mode: query.mode.tag(),
    }
}

/// Predefined regular-expression shortcut offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    Email,
    Ip,
    Url,
}

impl QuickFilter {
    /// The canonical pattern for this filter.
    ///
    /// The IP pattern is intentionally permissive (octets outside 0-255
    /// match): recall over precision, since forensic review prefers seeing
    /// near-misses to missing real addresses.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Email => r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            Self::Ip => r"\d+\.\d+\.\d+\.\d+",
            Self::Url => r"https?://[\w.-]+",
        }
    }

    /// The full query this filter triggers. Always forces
    /// [`SearchMode::RegexAdvanced`], overriding whatever mode was
    /// previously selected, so displayed text and mode never disagree.
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.pattern(), SearchMode::RegexAdvanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_default_mode_is_standard() {
        assert_eq!(SearchMode::default(), SearchMode::Standard);
    }

    #[test]
    fn test_translate_standard() {
        let params = translate(&SearchQuery::new("bitcoin", SearchMode::Standard));
        assert_eq!(params.q, "bitcoin");
        assert_eq!(params.mode, "default");
    }

    #[test]
    fn test_translate_regex_unescaped() {
        let params = translate(&SearchQuery::new(r"\d+\.\d+", SearchMode::RegexAdvanced));
        assert_eq!(params.q, r"\d+\.\d+");
        assert_eq!(params.mode, "regex");
    }

    #[test]
    fn test_translate_deep() {
        let params = translate(&SearchQuery::new("wallet", SearchMode::DeepSubstring));
        assert_eq!(params.mode, "deep");
    }

    #[test]
    fn test_translate_deterministic() {
        let query = SearchQuery::new("same", SearchMode::Standard);
        assert_eq!(translate(&query), translate(&query));
    }

    #[test]
    fn test_translate_invalid_regex_passed_through() {
        // Client-side translation is total; the backend reports the error.
        let params = translate(&SearchQuery::new("[unclosed", SearchMode::RegexAdvanced));
        assert_eq!(params.q, "[unclosed");
    }

    #[test]
    fn test_quick_filter_forces_regex_mode() {
        for filter in [QuickFilter::Email, QuickFilter::Ip, QuickFilter::Url] {
            assert_eq!(filter.query().mode, SearchMode::RegexAdvanced);
        }
    }

    #[test]
    fn test_email_pattern_matches() {
        let re = Regex::new(QuickFilter::Email.pattern()).unwrap();
        assert!(re.is_match("alice.smith+tag@example.co.uk"));
        assert!(!re.is_match("not-an-email"));
    }

    #[test]
    fn test_ip_pattern_permissive_by_design() {
        // Recall over precision: out-of-range octets still match.
        let re = Regex::new(QuickFilter::Ip.pattern()).unwrap();
        assert!(re.is_match("192.168.1.1"));
        assert!(re.is_match("999.999.1.1"));
        assert!(!re.is_match("no dots here"));
    }

    #[test]
    fn test_url_pattern_matches() {
        let re = Regex::new(QuickFilter::Url.pattern()).unwrap();
        assert!(re.is_match("https://evil-host.example"));
        assert!(re.is_match("http://127.0.0.1"));
        assert!(!re.is_match("ftp://old.example"));
    }
}
