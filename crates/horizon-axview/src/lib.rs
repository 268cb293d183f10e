//! Synthetic accessibility tree, rotor navigation, and update scheduling for
//! accessible rich text views.
//!
//! A host application renders styled, link-bearing text with its own rich
//! text renderer and hands the result (styled runs plus a line-layout
//! snapshot) to an [`AccessibleTextView`]. The view overlays a tree of
//! synthetic paragraph and link nodes on that text, keeps the tree fresh
//! through debounced rebuilds, repairs backward rotor traversal, reports the
//! measured content height upward, and projects the tree through
//! [`accesskit`] at the platform boundary.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use horizon_axview::AccessibleTextView;
//!
//! let mut view = AccessibleTextView::new();
//! let now = Instant::now();
//! view.set_options_json(r#"{ "html": "<p>Hello</p>" }"#, now)?;
//! // ... hand over rendered content, then drive the scheduler from the
//! // host event loop:
//! // view.set_content(styled_text, line_layout, now);
//! // view.process_due(now);
//! # Ok::<(), horizon_axview_core::Error>(())
//! ```

pub mod height;
pub mod platform;
pub mod rotor;
pub mod schedule;
pub mod tree;
pub mod view;

pub use height::HeightReporter;
pub use platform::{AssistiveBridge, FacilityProbe, InertBridge, ProbeOutcome};
pub use rotor::{navigate, RotorDirection};
pub use schedule::{RecomputeId, UpdateScheduler};
pub use tree::{
    build_tree, hint_for, node_id, tree_update, AccessibilityTree, Activation, BuildOutcome,
    FocusIdentity, LinkNode, NodeKey, ParagraphNode, Projection, ROOT_NODE_ID,
};
pub use view::AccessibleTextView;

/// Renderer-boundary data model.
pub mod model {
    pub use horizon_axview_core::*;
}
