//! Built-in legacy presets used when no catalog entry applies

use super::style::{
    ImagePosition, ImageSize, LayoutType, TemplateStyle, TextAlignment, DEFAULT_ACCENT,
    DEFAULT_BACKGROUND, DEFAULT_GRADIENT_END,
};

/// One of the three legacy templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyPreset {
    /// `template1`: CBS blue gradient, white text
    Blue,
    /// `template2`: dark gradient, white text
    Dark,
    /// `template3`: light gradient, near-black text
    Light,
}

impl LegacyPreset {
    pub const ALL: [LegacyPreset; 3] = [LegacyPreset::Blue, LegacyPreset::Dark, LegacyPreset::Light];

    /// Map a legacy id to a preset; anything unrecognised is the blue preset
    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "template2" => LegacyPreset::Dark,
            "template3" => LegacyPreset::Light,
            _ => LegacyPreset::Blue,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            LegacyPreset::Blue => "template1",
            LegacyPreset::Dark => "template2",
            LegacyPreset::Light => "template3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LegacyPreset::Blue => "CBS Blue",
            LegacyPreset::Dark => "Dark Theme",
            LegacyPreset::Light => "Light Theme",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LegacyPreset::Blue => "Default CBS Blue",
            LegacyPreset::Dark => "Dark background with white text",
            LegacyPreset::Light => "Light background with dark text",
        }
    }

    /// Build the full style descriptor for this preset
    pub fn style(&self) -> TemplateStyle {
        let (background, gradient_end, text, accent) = match self {
            LegacyPreset::Blue => (DEFAULT_BACKGROUND, DEFAULT_GRADIENT_END, "#FFFFFF", DEFAULT_ACCENT),
            LegacyPreset::Dark => ("#1a1a1a", "#2d2d2d", "#FFFFFF", DEFAULT_ACCENT),
            LegacyPreset::Light => ("#f8f9fa", "#e9ecef", "#181a1c", "#003DA5"),
        };

        TemplateStyle {
            id: Some(self.id().to_string()),
            name: Some(self.name().to_string()),
            background_color: background.to_string(),
            background_gradient_end: Some(gradient_end.to_string()),
            text_color: text.to_string(),
            accent_color: accent.to_string(),
            layout_type: LayoutType::SplitTextPrimary,
            image_position: ImagePosition::Right,
            image_size: ImageSize::Medium,
            text_alignment: TextAlignment::Left,
        }
    }
}
