//! Content height reporting.
//!
//! The host layout system sizes the embedding around the rendered text, so
//! after each layout pass the view reports a single scalar height upward.
//! Host line-spacing models apply inter-line leading between lines but not
//! after the last one, which makes the final line sit flush against the view
//! edge; one extra line of leading is added as padding to compensate.

use horizon_axview_core::LineLayout;

/// Computes and deduplicates the height reported to the host.
#[derive(Debug, Default)]
pub struct HeightReporter {
    last: Option<f32>,
}

impl HeightReporter {
    /// Create a reporter with no height reported yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The height the host should reserve for a layout.
    pub fn measure(layout: &LineLayout) -> f32 {
        layout.content_height() + layout.leading()
    }

    /// Observe a completed layout pass.
    ///
    /// Returns the height to report, or `None` when it matches the last
    /// reported value. Layout passes are already rate-limited by the host,
    /// so no debouncing happens here.
    pub fn observe(&mut self, layout: &LineLayout) -> Option<f32> {
        let height = Self::measure(layout);
        if self.last == Some(height) {
            return None;
        }
        self.last = Some(height);
        tracing::trace!(target: "horizon_axview::height", height, "content height changed");
        Some(height)
    }

    /// The last reported height, if any.
    pub fn last_reported(&self) -> Option<f32> {
        self.last
    }

    /// Forget the last reported height, forcing the next observation to
    /// report.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_axview_core::LaidLine;

    fn layout(lines: usize, line_height: f32, leading: f32) -> LineLayout {
        let laid = (0..lines)
            .map(|i| {
                LaidLine::uniform(
                    i * 10..(i + 1) * 10,
                    0.0,
                    i as f32 * line_height,
                    line_height,
                    8.0,
                )
            })
            .collect();
        LineLayout::new(laid, leading)
    }

    #[test]
    fn height_includes_trailing_leading() {
        let layout = layout(3, 20.0, 5.0);
        assert_eq!(HeightReporter::measure(&layout), 65.0);
    }

    #[test]
    fn reports_only_on_change() {
        let mut reporter = HeightReporter::new();
        let first = layout(2, 20.0, 5.0);

        assert_eq!(reporter.observe(&first), Some(45.0));
        // The same layout again: nothing to report.
        assert_eq!(reporter.observe(&first), None);

        let grown = layout(3, 20.0, 5.0);
        assert_eq!(reporter.observe(&grown), Some(65.0));
        assert_eq!(reporter.last_reported(), Some(65.0));
    }

    #[test]
    fn reset_forces_a_fresh_report() {
        let mut reporter = HeightReporter::new();
        let current = layout(2, 20.0, 5.0);

        assert!(reporter.observe(&current).is_some());
        reporter.reset();
        assert_eq!(reporter.observe(&current), Some(45.0));
    }

    #[test]
    fn empty_layout_reports_only_leading() {
        let mut reporter = HeightReporter::new();
        let empty = LineLayout::default();
        assert_eq!(reporter.observe(&empty), Some(0.0));
    }
}
