//! Styled run sequences produced by the host rich text renderer.
//!
//! A [`StyledText`] is the renderer-side contract: the rendered plain text,
//! an ordered sequence of [`StyledRun`]s with resolved attributes, and the
//! paragraph ranges derived from the renderer's paragraph/line-break
//! metadata. Runs are immutable once produced; a new render pass replaces the
//! whole document.

use std::ops::Range;

use url::Url;

use crate::color::Rgba;
use crate::font::FontDescriptor;

/// A contiguous text span with uniform formatting attributes and an optional
/// link destination.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    /// Half-open byte range into the document text.
    pub range: Range<usize>,
    /// Resolved font for this run, if it differs from the document default.
    pub font: Option<FontDescriptor>,
    /// Text color, if set.
    pub color: Option<Rgba>,
    /// Whether the run is underlined.
    pub underline: bool,
    /// Whether the run is struck through.
    pub strikethrough: bool,
    /// Link destination, or `None` for plain text.
    pub destination: Option<Url>,
}

impl StyledRun {
    /// Create a plain run covering `range`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            range,
            font: None,
            color: None,
            underline: false,
            strikethrough: false,
            destination: None,
        }
    }

    /// Set the link destination.
    pub fn with_destination(mut self, destination: Url) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Set the resolved font.
    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Mark the run as underlined.
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Mark the run as struck through.
    pub fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Check if this run covers no text.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// A rendered document: text, styled runs, and paragraph partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
    paragraphs: Vec<Range<usize>>,
}

impl StyledText {
    /// Create a document with the given plain text and no runs yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
            paragraphs: Vec::new(),
        }
    }

    /// Append a run. Runs must be pushed in text order.
    pub fn push_run(&mut self, run: StyledRun) {
        debug_assert!(
            run.range.end <= self.text.len(),
            "run range extends past the document text"
        );
        self.runs.push(run);
    }

    /// Append a paragraph range from the renderer's paragraph metadata.
    pub fn push_paragraph(&mut self, range: Range<usize>) {
        self.paragraphs.push(range);
    }

    /// The rendered plain text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The styled runs in text order.
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Check if the document has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the substring for `range`, clamped to the text.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = range.start.min(self.text.len());
        let end = range.end.clamp(start, self.text.len());
        self.text.get(start..end).unwrap_or("")
    }

    /// The paragraph partition of the document.
    ///
    /// When the renderer supplied no paragraph metadata, the whole text is
    /// one paragraph.
    pub fn paragraph_ranges(&self) -> Vec<Range<usize>> {
        if self.paragraphs.is_empty() {
            if self.text.is_empty() {
                Vec::new()
            } else {
                vec![0..self.text.len()]
            }
        } else {
            self.paragraphs.clone()
        }
    }
}
