//! Rotor traversal corrections.
//!
//! Platform link rotors search a flat element list, which stalls when the
//! user navigates backward from the first link of a paragraph: there is no
//! previous link, so the native search returns nothing and focus sticks.
//! [`navigate`] wraps the native search result and substitutes the containing
//! paragraph in exactly that case, so backward traversal walks out of the
//! paragraph instead of jamming.
//!
//! Targets are computed lazily against the current tree on every navigation
//! event. The tree is rebuilt on content change, so precomputing a target
//! table would hand out keys into disposed trees.

use crate::tree::{AccessibilityTree, NodeKey};

/// The direction of a rotor navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotorDirection {
    /// Jump to the next link.
    Next,
    /// Jump to the previous link.
    Previous,
}

/// Resolve the target of a rotor navigation event.
///
/// `native` is the platform's own search result. Forward navigation defers to
/// it entirely. Backward navigation also defers, except from the first link
/// of a paragraph, where the target becomes that paragraph node. If the
/// paragraph cannot be located, the fallback chain is: first node with a
/// child, then the first root node, then `None` (the view itself).
pub fn navigate(
    tree: &AccessibilityTree,
    direction: RotorDirection,
    current: NodeKey,
    native: Option<NodeKey>,
) -> Option<NodeKey> {
    match direction {
        RotorDirection::Next => native,
        RotorDirection::Previous => match current.link {
            // Paragraph nodes defer to the native search.
            None => native,
            // First link of its paragraph: return to the paragraph.
            Some(0) => {
                let paragraph = NodeKey::paragraph(current.paragraph);
                if tree.contains(paragraph) {
                    Some(paragraph)
                } else {
                    tracing::trace!(
                        target: "horizon_axview::rotor",
                        ?current,
                        "containing paragraph not found, falling back"
                    );
                    tree.first_with_children().or_else(|| tree.first_node())
                }
            }
            // Any later link defers to the native search.
            Some(_) => native,
        },
    }
}
