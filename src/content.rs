//! Slide content fields supplied by the caller
//!
//! The rendering engine only reads `SlideContent`. Every optional field is
//! normalised on construction so that whitespace-only strings behave exactly
//! like absent ones: slot visibility depends on nothing else.

use crate::error::{ContentError, ContentIssue};

/// Maximum headline length in characters
pub const MAX_HEADLINE: usize = 80;
/// Maximum caption length in characters
pub const MAX_CAPTION: usize = 60;
/// Maximum description length in characters
pub const MAX_DESCRIPTION: usize = 300;
/// Maximum author name length in characters
pub const MAX_AUTHOR: usize = 60;

/// Branding line rendered on every slide
pub const FOOTER_TEXT: &str = "Columbia Business School";

/// Semantic content of one slide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideContent {
    pub headline: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub publication_link: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub event_location: Option<String>,
    /// Raw uploaded image bytes
    pub image: Option<Vec<u8>>,
}

impl SlideContent {
    /// Create empty content
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = clean(Some(headline.into()));
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = clean(Some(caption.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = clean(Some(description.into()));
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author_name = clean(Some(author.into()));
        self
    }

    pub fn with_publication_link(mut self, link: impl Into<String>) -> Self {
        self.publication_link = clean(Some(link.into()));
        self
    }

    pub fn with_event_date(mut self, date: impl Into<String>) -> Self {
        self.event_date = clean(Some(date.into()));
        self
    }

    pub fn with_event_time(mut self, time: impl Into<String>) -> Self {
        self.event_time = clean(Some(time.into()));
        self
    }

    pub fn with_event_location(mut self, location: impl Into<String>) -> Self {
        self.event_location = clean(Some(location.into()));
        self
    }

    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = if bytes.is_empty() { None } else { Some(bytes) };
        self
    }

    /// Re-apply normalisation to fields that were assigned directly
    pub fn normalized(self) -> Self {
        Self {
            headline: clean(self.headline),
            caption: clean(self.caption),
            description: clean(self.description),
            author_name: clean(self.author_name),
            publication_link: clean(self.publication_link),
            event_date: clean(self.event_date),
            event_time: clean(self.event_time),
            event_location: clean(self.event_location),
            image: self.image.filter(|b| !b.is_empty()),
        }
    }

    /// True if at least one of date, time or location is present
    pub fn has_event_details(&self) -> bool {
        present(&self.event_date) || present(&self.event_time) || present(&self.event_location)
    }

    /// The link to encode in a QR code, if any
    pub fn qr_link(&self) -> Option<&str> {
        self.publication_link
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check field limits, reporting every violation
    pub fn validate(&self) -> Result<(), ContentError> {
        let mut issues = Vec::new();

        if !present(&self.headline) {
            issues.push(ContentIssue::Missing { field: "headline" });
        }
        check_len(&mut issues, "headline", &self.headline, MAX_HEADLINE);
        check_len(&mut issues, "caption", &self.caption, MAX_CAPTION);
        check_len(&mut issues, "description", &self.description, MAX_DESCRIPTION);
        check_len(&mut issues, "author_name", &self.author_name, MAX_AUTHOR);

        if let Some(link) = self.qr_link() {
            let lower = link.to_ascii_lowercase();
            let rest = lower
                .strip_prefix("https://")
                .or_else(|| lower.strip_prefix("http://"));
            if rest.map_or(true, |r| r.is_empty() || r.contains(char::is_whitespace)) {
                issues.push(ContentIssue::InvalidLink {
                    value: link.to_string(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ContentError { issues })
        }
    }
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().map_or(false, |s| !s.trim().is_empty())
}

fn clean(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn check_len(issues: &mut Vec<ContentIssue>, field: &'static str, value: &Option<String>, max: usize) {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max {
            issues.push(ContentIssue::TooLong { field, max, len });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let content = SlideContent::new()
            .with_headline("  Q3 Results  ")
            .with_caption("   ")
            .with_event_time("");
        assert_eq!(content.headline.as_deref(), Some("Q3 Results"));
        assert_eq!(content.caption, None);
        assert_eq!(content.event_time, None);
    }

    #[test]
    fn test_normalized_cleans_direct_assignments() {
        let content = SlideContent {
            description: Some("\t\n".to_string()),
            publication_link: Some(" https://example.com ".to_string()),
            image: Some(vec![]),
            ..Default::default()
        }
        .normalized();
        assert_eq!(content.description, None);
        assert_eq!(content.publication_link.as_deref(), Some("https://example.com"));
        assert_eq!(content.image, None);
    }

    #[test]
    fn test_event_details_presence() {
        assert!(!SlideContent::new().has_event_details());
        assert!(SlideContent::new().with_event_location("Room 100").has_event_details());
    }

    #[test]
    fn test_validate_ok() {
        let content = SlideContent::new()
            .with_headline("Research Spotlight")
            .with_description("A short blurb")
            .with_publication_link("https://www8.gsb.columbia.edu/");
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let content = SlideContent::new()
            .with_caption("c".repeat(61))
            .with_publication_link("not a url");
        let err = content.validate().unwrap_err();
        assert_eq!(err.issues.len(), 3);
        assert!(err
            .issues
            .iter()
            .any(|i| matches!(i, ContentIssue::Missing { field: "headline" })));
        assert!(err
            .issues
            .iter()
            .any(|i| matches!(i, ContentIssue::TooLong { field: "caption", max: 60, len: 61 })));
    }
}
