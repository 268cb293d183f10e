//! Line-layout snapshots supplied by the host text renderer.
//!
//! The accessibility layer never shapes or lays out text itself. After each
//! layout pass the host renderer hands over a [`LineLayout`]: one
//! [`LaidLine`] per visual line, each carrying the byte range of the original
//! text it covers, its rectangle, and per-cluster x positions so that partial
//! ranges map to exact horizontal spans.

use std::ops::Range;

use crate::geometry::Rect;

/// The horizontal position of one laid-out cluster within a line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPos {
    /// The byte range in the original text this cluster covers.
    pub range: Range<usize>,
    /// X offset from the line's left edge.
    pub x: f32,
    /// Advance width of the cluster.
    pub width: f32,
}

/// A single laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    /// The byte range in the original text that this line covers.
    pub text_range: Range<usize>,
    /// X offset from the left of the layout to this line's content.
    pub left: f32,
    /// Y offset from the top of the layout to this line's top.
    pub top_y: f32,
    /// Height of this line.
    pub height: f32,
    /// Width of this line's content.
    pub width: f32,
    /// Cluster positions in text order.
    pub clusters: Vec<ClusterPos>,
}

impl LaidLine {
    /// Create a line from explicit cluster positions.
    pub fn new(
        text_range: Range<usize>,
        left: f32,
        top_y: f32,
        height: f32,
        clusters: Vec<ClusterPos>,
    ) -> Self {
        let width = clusters
            .last()
            .map(|cluster| cluster.x + cluster.width)
            .unwrap_or(0.0);
        Self {
            text_range,
            left,
            top_y,
            height,
            width,
            clusters,
        }
    }

    /// Create a line with one fixed-advance cluster per byte.
    ///
    /// Convenience for hosts (and tests) whose renderer reports uniform
    /// advances; real shaping output should use [`LaidLine::new`].
    pub fn uniform(
        text_range: Range<usize>,
        left: f32,
        top_y: f32,
        height: f32,
        advance: f32,
    ) -> Self {
        let start = text_range.start;
        let clusters = text_range
            .clone()
            .map(|offset| ClusterPos {
                range: offset..offset + 1,
                x: (offset - start) as f32 * advance,
                width: advance,
            })
            .collect();
        Self::new(text_range, left, top_y, height, clusters)
    }

    /// Check if this line is empty (no clusters).
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// The rectangle of this line in layout coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top_y, self.width, self.height)
    }

    /// Get the x position for a given text offset, relative to the line's
    /// left edge.
    pub fn x_for_offset(&self, offset: usize) -> f32 {
        if offset <= self.text_range.start || self.clusters.is_empty() {
            return 0.0;
        }

        for cluster in &self.clusters {
            if cluster.range.start >= offset {
                return cluster.x;
            }
            if cluster.range.contains(&offset) {
                return cluster.x;
            }
        }

        self.width
    }
}

/// A snapshot of the renderer's current line layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineLayout {
    lines: Vec<LaidLine>,
    leading: f32,
}

impl LineLayout {
    /// Create a snapshot from laid-out lines.
    ///
    /// `leading` is the inter-line spacing the renderer's line-spacing model
    /// applies between lines but not after the last one.
    pub fn new(lines: Vec<LaidLine>, leading: f32) -> Self {
        Self { lines, leading }
    }

    /// Get the laid-out lines.
    pub fn lines(&self) -> &[LaidLine] {
        &self.lines
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the layout contains no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The inter-line leading excluded after the last line.
    pub fn leading(&self) -> f32 {
        self.leading
    }

    /// Total height of the laid-out content.
    pub fn content_height(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.top_y + line.height)
            .fold(0.0, f32::max)
    }

    /// Width of the widest line.
    pub fn content_width(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.left + line.width)
            .fold(0.0, f32::max)
    }

    /// Get the rectangles covering a byte range, one per intersecting line.
    pub fn selection_rects(&self, start: usize, end: usize) -> Vec<Rect> {
        if start >= end || self.lines.is_empty() {
            return Vec::new();
        }

        let mut rects = Vec::new();

        for line in &self.lines {
            // Skip lines that don't overlap with the range.
            if line.text_range.end <= start || line.text_range.start >= end {
                continue;
            }

            // Calculate the portion of this line that's covered.
            let line_start = start.max(line.text_range.start);
            let line_end = end.min(line.text_range.end);

            let x_start = line.x_for_offset(line_start) + line.left;
            let x_end = if line_end >= line.text_range.end {
                // The range extends to the end of the line.
                line.width + line.left
            } else {
                line.x_for_offset(line_end) + line.left
            };

            let width = (x_end - x_start).max(0.0);

            rects.push(Rect::new(x_start, line.top_y, width, line.height));
        }

        rects
    }
}
