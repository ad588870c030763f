//! Resolved visual style descriptor for a slide

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Default background start color (CBS blue)
pub const DEFAULT_BACKGROUND: &str = "#003DA5";
/// Default background gradient end color
pub const DEFAULT_GRADIENT_END: &str = "#0052CC";
/// Default text color
pub const DEFAULT_TEXT: &str = "#FFFFFF";
/// Default accent color
pub const DEFAULT_ACCENT: &str = "#009bdb";

/// Arrangement hint carried by a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    FullHero,
    #[default]
    SplitTextPrimary,
    SplitImagePrimary,
    Circular,
    Center,
    None,
    MediaVertical,
    MediaWide,
    CongratsFramed,
    PodcastStandard,
    PodcastFeature,
}

impl LayoutType {
    /// All hints, in declaration order
    pub const ALL: [LayoutType; 11] = [
        LayoutType::FullHero,
        LayoutType::SplitTextPrimary,
        LayoutType::SplitImagePrimary,
        LayoutType::Circular,
        LayoutType::Center,
        LayoutType::None,
        LayoutType::MediaVertical,
        LayoutType::MediaWide,
        LayoutType::CongratsFramed,
        LayoutType::PodcastStandard,
        LayoutType::PodcastFeature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::FullHero => "full_hero",
            LayoutType::SplitTextPrimary => "split_text_primary",
            LayoutType::SplitImagePrimary => "split_image_primary",
            LayoutType::Circular => "circular",
            LayoutType::Center => "center",
            LayoutType::None => "none",
            LayoutType::MediaVertical => "media_vertical",
            LayoutType::MediaWide => "media_wide",
            LayoutType::CongratsFramed => "congrats_framed",
            LayoutType::PodcastStandard => "podcast_standard",
            LayoutType::PodcastFeature => "podcast_feature",
        }
    }

    pub fn is_podcast(&self) -> bool {
        matches!(self, LayoutType::PodcastStandard | LayoutType::PodcastFeature)
    }
}

/// Where a template places the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePosition {
    Left,
    #[default]
    Right,
    Full,
    Circular,
    Center,
    None,
}

impl ImagePosition {
    pub const ALL: [ImagePosition; 6] = [
        ImagePosition::Left,
        ImagePosition::Right,
        ImagePosition::Full,
        ImagePosition::Circular,
        ImagePosition::Center,
        ImagePosition::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePosition::Left => "left",
            ImagePosition::Right => "right",
            ImagePosition::Full => "full",
            ImagePosition::Circular => "circular",
            ImagePosition::Center => "center",
            ImagePosition::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlignment::Left => "left",
            TextAlignment::Center => "center",
            TextAlignment::Right => "right",
        }
    }
}

/// Error for an unrecognised enum keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword(pub String);

impl fmt::Display for UnknownKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyword '{}'", self.0)
    }
}

impl std::error::Error for UnknownKeyword {}

macro_rules! keyword_enum {
    ($ty:ty, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
                $(
                    if $variant.as_str() == normalized {
                        return Ok($variant);
                    }
                )+
                Err(UnknownKeyword(s.to_string()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        // Unknown or null keywords degrade to the default variant.
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw: Option<String> = Option::deserialize(deserializer)?;
                Ok(raw
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default())
            }
        }
    };
}

keyword_enum!(
    LayoutType,
    [
        LayoutType::FullHero,
        LayoutType::SplitTextPrimary,
        LayoutType::SplitImagePrimary,
        LayoutType::Circular,
        LayoutType::Center,
        LayoutType::None,
        LayoutType::MediaVertical,
        LayoutType::MediaWide,
        LayoutType::CongratsFramed,
        LayoutType::PodcastStandard,
        LayoutType::PodcastFeature,
    ]
);
keyword_enum!(
    ImagePosition,
    [
        ImagePosition::Left,
        ImagePosition::Right,
        ImagePosition::Full,
        ImagePosition::Circular,
        ImagePosition::Center,
        ImagePosition::None,
    ]
);
keyword_enum!(ImageSize, [ImageSize::Small, ImageSize::Medium, ImageSize::Large]);
keyword_enum!(
    TextAlignment,
    [TextAlignment::Left, TextAlignment::Center, TextAlignment::Right]
);

/// A complete, immutable style descriptor for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateStyle {
    /// Catalog id, when the style came from a catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(alias = "backgroundColor", deserialize_with = "nullable_string")]
    pub background_color: String,
    #[serde(
        default,
        alias = "backgroundGradientEnd",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_gradient_end: Option<String>,
    #[serde(alias = "textColor", deserialize_with = "nullable_string")]
    pub text_color: String,
    #[serde(alias = "accentColor", deserialize_with = "nullable_string")]
    pub accent_color: String,
    #[serde(alias = "layoutType")]
    pub layout_type: LayoutType,
    #[serde(alias = "imagePosition")]
    pub image_position: ImagePosition,
    #[serde(alias = "imageSize")]
    pub image_size: ImageSize,
    #[serde(alias = "textAlignment")]
    pub text_alignment: TextAlignment,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            background_color: DEFAULT_BACKGROUND.to_string(),
            background_gradient_end: Some(DEFAULT_GRADIENT_END.to_string()),
            text_color: DEFAULT_TEXT.to_string(),
            accent_color: DEFAULT_ACCENT.to_string(),
            layout_type: LayoutType::default(),
            image_position: ImagePosition::default(),
            image_size: ImageSize::default(),
            text_alignment: TextAlignment::default(),
        }
    }
}

impl TemplateStyle {
    /// Create the default (blue) style
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_type(mut self, layout_type: LayoutType) -> Self {
        self.layout_type = layout_type;
        self
    }

    pub fn with_image_position(mut self, position: ImagePosition) -> Self {
        self.image_position = position;
        self
    }

    pub fn with_colors(
        mut self,
        background: impl Into<String>,
        text: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        self.background_color = background.into();
        self.text_color = text.into();
        self.accent_color = accent.into();
        self
    }

    pub fn with_gradient_end(mut self, end: impl Into<String>) -> Self {
        self.background_gradient_end = Some(end.into());
        self
    }

    /// Gradient end, falling back to the start color
    pub fn gradient_end(&self) -> &str {
        self.background_gradient_end
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.background_color)
    }

    /// Fill blank color fields with defaults
    ///
    /// Styles arriving over the wire may carry empty strings; a render pass
    /// must never see a blank color.
    pub fn completed(mut self) -> Self {
        fill_blank(&mut self.background_color, DEFAULT_BACKGROUND);
        fill_blank(&mut self.text_color, DEFAULT_TEXT);
        fill_blank(&mut self.accent_color, DEFAULT_ACCENT);
        if self
            .background_gradient_end
            .as_deref()
            .map_or(false, |s| s.trim().is_empty())
        {
            self.background_gradient_end = None;
        }
        self
    }
}

// `null` colors deserialize as blank and are filled by `completed`.
fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn fill_blank(field: &mut String, default: &str) {
    if field.trim().is_empty() {
        *field = default.to_string();
    }
}
