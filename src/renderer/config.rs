//! HTML output options

/// How a slide tree is serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlConfig {
    /// `Some(title)` wraps the slide in a complete document with that title
    pub document: Option<String>,
    /// One element per line, indented by depth
    pub indent: bool,
    /// Prepended to every class name; empty for bare names
    pub class_prefix: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            document: Some("Slide".to_string()),
            indent: true,
            class_prefix: "sr-".to_string(),
        }
    }
}

impl HtmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bare slide element, for embedding in a host page
    pub fn fragment() -> Self {
        Self {
            document: None,
            ..Self::default()
        }
    }

    /// Wrap output in a document titled `title`
    pub fn with_document(mut self, title: impl Into<String>) -> Self {
        self.document = Some(title.into());
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    pub fn is_document(&self) -> bool {
        self.document.is_some()
    }
}
