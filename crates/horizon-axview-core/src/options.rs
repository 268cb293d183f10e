//! The inbound option record and its merge semantics.
//!
//! The host sends options as a JSON object with every field optional. A new
//! record overlays only its present fields onto the previous record
//! (last-writer-wins per field); absent fields keep their prior values.
//! A record that fails to decode is replaced by one carrying only an error
//! code and message, so prior visual state is never disturbed by bad input.

use std::num::NonZeroU32;

use serde::Deserialize;

use crate::color::ApiColor;
use crate::error::ErrorReport;
use crate::style::TextStyleOptions;

/// Light/dark appearance hint from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Brightness {
    Light,
    Dark,
}

/// How the view presents itself to assistive technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessibilityBehavior {
    /// Leave the platform text element alone.
    #[default]
    PlatformDefault,
    /// Platform default, plus a flattened link list while switch-style
    /// input is active and a long-press links menu.
    PlatformDefaultPlusLinksLongPressMenu,
    /// Replace the platform element with the synthetic paragraph/link tree.
    LinksAsFocusNodes,
}

/// The options record sent by the host embedding layer.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextViewOptions {
    /// Markup content. Parsed into styled runs by the host's renderer.
    pub html: Option<String>,
    /// Style block for body text.
    pub text_style: Option<TextStyleOptions>,
    /// Style block for link text.
    pub link_style: Option<TextStyleOptions>,
    /// External text scale factor applied by the host.
    pub text_scale_factor: Option<f32>,
    /// View background color.
    pub background_color: Option<ApiColor>,
    /// Whether the host should run pattern-based link detection.
    pub auto_linkify: Option<bool>,
    /// Whether text selection is enabled.
    pub is_selectable: Option<bool>,
    /// Minimum number of lines to reserve.
    pub min_lines: Option<u32>,
    /// Maximum number of lines before truncation; 0 means unbounded.
    pub max_lines: Option<u32>,
    /// Light/dark appearance hint.
    pub brightness: Option<Brightness>,
    /// Assistive-technology presentation mode.
    pub accessibility_behavior: Option<AccessibilityBehavior>,
    /// Expose link nodes directly under the root instead of nesting them
    /// inside paragraph containers.
    pub flatten_hierarchy: Option<bool>,
    /// Error code, set only on records produced from failed decodes.
    pub error_code: Option<String>,
    /// Error message accompanying `error_code`.
    pub error_message: Option<String>,
}

impl TextViewOptions {
    /// Decode an options record from JSON.
    ///
    /// Never fails: a record that cannot be decoded is replaced by one
    /// carrying only the error code and message.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(
                    target: "horizon_axview_core::options",
                    error = %err,
                    "failed to decode options record"
                );
                Self {
                    error_code: Some("JSONError".to_string()),
                    error_message: Some(err.to_string()),
                    ..Self::default()
                }
            }
        }
    }

    /// Overlay `newer` onto this record, field by field.
    ///
    /// Present fields of `newer` win; absent fields keep their prior values.
    /// Style blocks replace wholesale, not per inner field.
    pub fn merged_with(&self, newer: TextViewOptions) -> TextViewOptions {
        TextViewOptions {
            html: newer.html.or_else(|| self.html.clone()),
            text_style: newer.text_style.or_else(|| self.text_style.clone()),
            link_style: newer.link_style.or_else(|| self.link_style.clone()),
            text_scale_factor: newer.text_scale_factor.or(self.text_scale_factor),
            background_color: newer
                .background_color
                .or_else(|| self.background_color.clone()),
            auto_linkify: newer.auto_linkify.or(self.auto_linkify),
            is_selectable: newer.is_selectable.or(self.is_selectable),
            min_lines: newer.min_lines.or(self.min_lines),
            max_lines: newer.max_lines.or(self.max_lines),
            brightness: newer.brightness.or(self.brightness),
            accessibility_behavior: newer
                .accessibility_behavior
                .or(self.accessibility_behavior),
            flatten_hierarchy: newer.flatten_hierarchy.or(self.flatten_hierarchy),
            error_code: newer.error_code.or_else(|| self.error_code.clone()),
            error_message: newer.error_message.or_else(|| self.error_message.clone()),
        }
    }

    /// The error record carried by this options value, if any.
    pub fn error_report(&self) -> Option<ErrorReport> {
        self.error_code.as_ref().map(|code| ErrorReport {
            code: code.clone(),
            message: self.error_message.clone().unwrap_or_default(),
        })
    }

    /// The effective line limit: `None` means unbounded.
    ///
    /// A `maxLines` of 0 is "no limit", matching hosts that cannot express
    /// an unbounded line count directly.
    pub fn effective_max_lines(&self) -> Option<NonZeroU32> {
        self.max_lines.and_then(NonZeroU32::new)
    }

    /// Whether the record carries renderable markup.
    pub fn has_content(&self) -> bool {
        self.html.as_deref().is_some_and(|html| !html.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let options = TextViewOptions::from_json(
            r#"{
                "html": "<p>Hello</p>",
                "textStyle": { "fontSize": 16, "fontWeight": 400 },
                "linkStyle": { "fontWeight": 700, "decoration": "underline" },
                "backgroundColor": [255, 255, 255, 255],
                "autoLinkify": false,
                "isSelectable": true,
                "maxLines": 3,
                "brightness": "dark",
                "accessibilityBehavior": "linksAsFocusNodes"
            }"#,
        );

        assert!(options.error_report().is_none());
        assert_eq!(options.html.as_deref(), Some("<p>Hello</p>"));
        assert_eq!(options.max_lines, Some(3));
        assert_eq!(options.brightness, Some(Brightness::Dark));
        assert_eq!(
            options.accessibility_behavior,
            Some(AccessibilityBehavior::LinksAsFocusNodes)
        );
        assert!(options.link_style.unwrap().is_underline());
    }

    #[test]
    fn decode_failure_yields_error_record() {
        let options = TextViewOptions::from_json("{not json");
        let report = options.error_report().expect("error report");
        assert_eq!(report.code, "JSONError");
        assert!(!report.message.is_empty());
        // Nothing else is set.
        assert!(options.html.is_none());
        assert!(options.text_style.is_none());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let options = TextViewOptions::from_json(r#"{ "html": "x", "someFutureField": 1 }"#);
        assert!(options.error_report().is_none());
        assert_eq!(options.html.as_deref(), Some("x"));
    }

    #[test]
    fn merge_overlays_present_fields_only() {
        let base = TextViewOptions::from_json(
            r#"{ "html": "<p>one</p>", "maxLines": 2, "autoLinkify": true }"#,
        );
        let update = TextViewOptions::from_json(r#"{ "backgroundColor": [255, 0, 0, 0] }"#);

        let merged = base.merged_with(update);
        assert_eq!(merged.html.as_deref(), Some("<p>one</p>"));
        assert_eq!(merged.max_lines, Some(2));
        assert_eq!(merged.auto_linkify, Some(true));
        assert!(merged.background_color.is_some());
    }

    #[test]
    fn merge_is_last_writer_wins_per_field() {
        let base = TextViewOptions::from_json(r#"{ "maxLines": 2 }"#);
        let update = TextViewOptions::from_json(r#"{ "maxLines": 5 }"#);
        assert_eq!(base.merged_with(update).max_lines, Some(5));
    }

    #[test]
    fn zero_max_lines_means_unbounded() {
        let limited = TextViewOptions::from_json(r#"{ "maxLines": 3 }"#);
        assert_eq!(limited.effective_max_lines().map(NonZeroU32::get), Some(3));

        let unbounded = TextViewOptions::from_json(r#"{ "maxLines": 0 }"#);
        assert_eq!(unbounded.effective_max_lines(), None);
    }

    #[test]
    fn blank_html_is_not_content() {
        assert!(!TextViewOptions::from_json(r#"{ "html": "" }"#).has_content());
        assert!(!TextViewOptions::default().has_content());
        assert!(TextViewOptions::from_json(r#"{ "html": "a" }"#).has_content());
    }
}
