//! Per-style option blocks from the host.
//!
//! The host sends up to two style blocks per view (body text and link text)
//! as part of the options record. All fields are optional on the wire; a
//! style block that is present replaces the previous block wholesale during
//! the option merge.

use serde::Deserialize;

use crate::color::ApiColor;
use crate::font::{FontRequest, FontWeight, DEFAULT_FONT_SIZE};

/// Slant requested for a style block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSlant {
    /// Upright text.
    #[default]
    Normal,
    /// Italic text.
    Italic,
}

/// The kind of text decoration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationKind {
    /// No decoration.
    #[default]
    None,
    /// Line below the text.
    Underline,
    /// Line above the text.
    Overline,
    /// Line through the middle of the text.
    LineThrough,
}

/// Text decoration line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationStyle {
    /// Solid line.
    #[default]
    Solid,
    /// Two parallel lines.
    Double,
    /// Dotted line.
    Dotted,
    /// Dashed line.
    Dashed,
    /// Wavy line.
    Wavy,
}

/// How text that exceeds the line budget is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverflowPolicy {
    /// Clip at the boundary.
    #[default]
    Clip,
    /// Fade out at the boundary.
    Fade,
    /// Truncate with an ellipsis.
    Ellipsis,
    /// Let the text overflow visibly.
    Visible,
}

/// A style block as sent by the host.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyleOptions {
    pub color: Option<ApiColor>,
    pub background_color: Option<ApiColor>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    /// Numeric weight, 100-900 (400 = normal, 700 = bold).
    pub font_weight: Option<u16>,
    pub font_style: Option<FontSlant>,
    pub letter_spacing: Option<f32>,
    pub word_spacing: Option<f32>,
    /// Line-height multiplier (1.0 = font default).
    pub height: Option<f32>,
    pub decoration: Option<DecorationKind>,
    pub decoration_color: Option<ApiColor>,
    pub decoration_style: Option<DecorationStyle>,
    pub decoration_thickness: Option<f32>,
    pub overflow: Option<OverflowPolicy>,
}

impl TextStyleOptions {
    /// The weight of this block, or `fallback` when unset.
    pub fn weight_or(&self, fallback: FontWeight) -> FontWeight {
        self.font_weight.map(FontWeight::new).unwrap_or(fallback)
    }

    /// Whether this block requests an italic face.
    pub fn is_italic(&self) -> bool {
        self.font_style == Some(FontSlant::Italic)
    }

    /// Whether this block requests an underline.
    pub fn is_underline(&self) -> bool {
        self.decoration == Some(DecorationKind::Underline)
    }

    /// Whether this block requests a strikethrough.
    pub fn is_line_through(&self) -> bool {
        self.decoration == Some(DecorationKind::LineThrough)
    }

    /// Assemble the font request for this block.
    ///
    /// `fallback_weight` supplies the weight when the block sets none (link
    /// blocks inherit the body text weight), and `scale_factor` is the
    /// host's external text scale.
    pub fn font_request(
        &self,
        fallback_weight: FontWeight,
        scale_factor: Option<f32>,
    ) -> FontRequest {
        let mut request = FontRequest::new(self.font_size.unwrap_or(DEFAULT_FONT_SIZE))
            .weight(self.weight_or(fallback_weight))
            .italic(self.is_italic());
        if let Some(family) = &self.font_family {
            request = request.family(family.clone());
        }
        if let Some(factor) = scale_factor {
            request = request.scale_factor(factor);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_fields() {
        let style: TextStyleOptions = serde_json::from_str(
            r#"{
                "color": [255, 0, 0, 255],
                "fontFamily": "Inter",
                "fontSize": 16,
                "fontWeight": 600,
                "fontStyle": "italic",
                "decoration": "lineThrough",
                "decorationStyle": "wavy",
                "overflow": "ellipsis"
            }"#,
        )
        .unwrap();

        assert_eq!(style.font_family.as_deref(), Some("Inter"));
        assert_eq!(style.font_weight, Some(600));
        assert!(style.is_italic());
        assert!(style.is_line_through());
        assert_eq!(style.decoration_style, Some(DecorationStyle::Wavy));
        assert_eq!(style.overflow, Some(OverflowPolicy::Ellipsis));
    }

    #[test]
    fn absent_fields_default_to_none() {
        let style: TextStyleOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(style, TextStyleOptions::default());
        assert!(!style.is_italic());
        assert!(!style.is_underline());
    }

    #[test]
    fn font_request_inherits_fallback_weight() {
        let style = TextStyleOptions {
            font_family: Some("Inter".into()),
            ..Default::default()
        };
        let request = style.font_request(FontWeight::SEMI_BOLD, Some(1.25));
        assert_eq!(request.weight, FontWeight::SEMI_BOLD);
        assert_eq!(request.family.as_deref(), Some("Inter"));
        assert_eq!(request.scale_factor, Some(1.25));
        assert_eq!(request.size, DEFAULT_FONT_SIZE);
    }
}
