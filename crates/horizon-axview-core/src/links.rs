//! Link extraction from styled run sequences.
//!
//! Renderers commonly split one logical link across several runs (style
//! changes inside the link text, bidi boundaries, span rewriting). Assistive
//! technologies should see one navigable element per destination span, so
//! contiguous runs sharing a destination are coalesced into a single
//! [`LinkOccurrence`].

use std::ops::Range;

use url::Url;

use crate::run::StyledText;

/// One navigable link span: where it is, where it goes, and what it says.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOccurrence {
    /// Half-open byte range of the link text in the document.
    pub range: Range<usize>,
    /// The link destination.
    pub destination: Url,
    /// The visible text of the span.
    pub display_text: String,
}

/// Extract the ordered link occurrences of a whole document.
///
/// Pure and total: an empty document yields an empty list.
pub fn collect_links(doc: &StyledText) -> Vec<LinkOccurrence> {
    collect_links_in(doc, 0..doc.text().len())
}

/// Extract the ordered link occurrences restricted to `range`.
///
/// Runs are processed in the order they appear and never reordered.
/// Zero-length runs are skipped. A run whose destination matches the previous
/// occurrence and whose range starts where that occurrence ends extends it;
/// same-destination links separated by intervening text stay distinct.
pub fn collect_links_in(doc: &StyledText, range: Range<usize>) -> Vec<LinkOccurrence> {
    let mut occurrences: Vec<LinkOccurrence> = Vec::new();

    for run in doc.runs() {
        if run.is_empty() {
            continue;
        }

        let Some(destination) = &run.destination else {
            continue;
        };

        // Clip the run to the requested range.
        let start = run.range.start.max(range.start);
        let end = run.range.end.min(range.end);
        if start >= end {
            continue;
        }

        match occurrences.last_mut() {
            Some(last) if last.destination == *destination && last.range.end == start => {
                last.range.end = end;
                last.display_text = doc.slice(last.range.clone()).to_string();
            }
            _ => {
                occurrences.push(LinkOccurrence {
                    range: start..end,
                    destination: destination.clone(),
                    display_text: doc.slice(start..end).to_string(),
                });
            }
        }
    }

    occurrences
}
