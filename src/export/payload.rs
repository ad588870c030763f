//! The data object injected by the export driver
//!
//! Upstream callers are inconsistent about key casing, so every field is
//! accepted in both camelCase and snake_case. When both spellings are present
//! the first non-empty one wins, camelCase first.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::content::SlideContent;
use crate::template::TemplateStyle;

/// Errors that can occur while reading a payload
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field '{field}' must be a string")]
    NotAString { field: &'static str },

    #[error("invalid templateStyle: {0}")]
    Style(serde_json::Error),
}

/// Content fields, base64 image and style for one export render
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ExportPayload {
    pub headline: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub publication_link: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub event_location: Option<String>,
    /// Base64-encoded image bytes
    pub image_data: Option<String>,
    pub template_style: Option<TemplateStyle>,
}

impl ExportPayload {
    /// Parse a payload from JSON text
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(PayloadError::NotAnObject(json_type(&other))),
        }
    }

    /// Slide content, with the image decoded
    ///
    /// Base64 that does not decode is logged and treated as no image.
    pub fn content(&self) -> SlideContent {
        SlideContent {
            headline: self.headline.clone(),
            caption: self.caption.clone(),
            description: self.description.clone(),
            author_name: self.author_name.clone(),
            publication_link: self.publication_link.clone(),
            event_date: self.event_date.clone(),
            event_time: self.event_time.clone(),
            event_location: self.event_location.clone(),
            image: self.image_bytes(),
        }
        .normalized()
    }

    /// Decoded image bytes, if any decode
    pub fn image_bytes(&self) -> Option<Vec<u8>> {
        let data = self.image_data.as_deref()?.trim();
        if data.is_empty() {
            return None;
        }
        // Tolerate a data URI prefix
        let data = match data.split_once(";base64,") {
            Some((head, rest)) if head.starts_with("data:") => rest,
            _ => data,
        };
        match STANDARD
            .decode(data)
            .or_else(|_| STANDARD_NO_PAD.decode(data))
        {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(e) => {
                warn!("imageData is not valid base64, rendering without image: {}", e);
                None
            }
        }
    }

    /// The injected style, completed with defaults
    pub fn style(&self) -> TemplateStyle {
        self.template_style
            .clone()
            .map(TemplateStyle::completed)
            .unwrap_or_default()
    }
}

impl TryFrom<Map<String, Value>> for ExportPayload {
    type Error = PayloadError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let template_style = match pick(&map, "templateStyle", "template_style") {
            Some(value) => Some(serde_json::from_value(value.clone()).map_err(PayloadError::Style)?),
            None => None,
        };

        Ok(Self {
            headline: text(&map, "headline", "headline")?,
            caption: text(&map, "caption", "caption")?,
            description: text(&map, "description", "description")?,
            author_name: text(&map, "authorName", "author_name")?,
            publication_link: text(&map, "publicationLink", "publication_link")?,
            event_date: text(&map, "eventDate", "event_date")?,
            event_time: text(&map, "eventTime", "event_time")?,
            event_location: text(&map, "eventLocation", "event_location")?,
            image_data: text(&map, "imageData", "image_data")?,
            template_style,
        })
    }
}

// First present, non-null value under either key.
fn pick<'a>(map: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    [camel, snake]
        .into_iter()
        .filter_map(|key| map.get(key))
        .find(|v| match v {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn text(
    map: &Map<String, Value>,
    camel: &'static str,
    snake: &'static str,
) -> Result<Option<String>, PayloadError> {
    match pick(map, camel, snake) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Numbers and booleans are rendered as written
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(PayloadError::NotAString { field: camel }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{ImagePosition, LayoutType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_and_snake_keys_agree() {
        let camel = ExportPayload::from_json(
            r#"{"headline": "Q3", "authorName": "Ada", "publicationLink": "https://x.io",
                "eventDate": "Oct 1", "eventTime": "5 PM", "eventLocation": "Room 100"}"#,
        )
        .unwrap();
        let snake = ExportPayload::from_json(
            r#"{"headline": "Q3", "author_name": "Ada", "publication_link": "https://x.io",
                "event_date": "Oct 1", "event_time": "5 PM", "event_location": "Room 100"}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.content().author_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_both_spellings_present() {
        let payload = ExportPayload::from_json(
            r#"{"eventDate": "", "event_date": "Oct 2", "authorName": "A", "author_name": "B"}"#,
        )
        .unwrap();
        assert_eq!(payload.event_date.as_deref(), Some("Oct 2"));
        assert_eq!(payload.author_name.as_deref(), Some("A"));
    }

    #[test]
    fn test_nulls_are_absent() {
        let payload = ExportPayload::from_json(
            r#"{"headline": "Q3 Results", "eventTime": null, "imageData": null}"#,
        )
        .unwrap();
        assert_eq!(payload.event_time, None);
        assert_eq!(payload.image_bytes(), None);
    }

    #[test]
    fn test_image_decoding() {
        let encoded = STANDARD.encode(b"\x89PNG fake");
        let payload = ExportPayload {
            image_data: Some(encoded.clone()),
            ..Default::default()
        };
        assert_eq!(payload.image_bytes().as_deref(), Some(&b"\x89PNG fake"[..]));

        let with_prefix = ExportPayload {
            image_data: Some(format!("data:image/png;base64,{}", encoded)),
            ..Default::default()
        };
        assert_eq!(with_prefix.image_bytes(), payload.image_bytes());

        let broken = ExportPayload {
            image_data: Some("!!not base64!!".to_string()),
            ..Default::default()
        };
        assert_eq!(broken.image_bytes(), None);
    }

    #[test]
    fn test_template_style() {
        let payload = ExportPayload::from_json(
            r##"{"templateStyle": {"background_color": "#111111", "layout_type": "media_wide",
                 "image_position": "left", "text_color": null}}"##,
        )
        .unwrap();
        let style = payload.style();
        assert_eq!(style.layout_type, LayoutType::MediaWide);
        assert_eq!(style.image_position, ImagePosition::Left);
        assert_eq!(style.text_color, "#FFFFFF");
        assert_eq!(ExportPayload::default().style(), TemplateStyle::default());
    }

    #[test]
    fn test_deserialize_via_serde() {
        let payload: ExportPayload =
            serde_json::from_str(r#"{"template_style": {}, "caption": "Hi"}"#).unwrap();
        assert_eq!(payload.caption.as_deref(), Some("Hi"));
        assert!(payload.template_style.is_some());
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            ExportPayload::from_json("[1, 2]"),
            Err(PayloadError::NotAnObject("an array"))
        ));
        assert!(matches!(
            ExportPayload::from_json(r#"{"headline": ["a"]}"#),
            Err(PayloadError::NotAString { field: "headline" })
        ));
    }
}
