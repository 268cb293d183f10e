//! Text model, geometry, and option decoding for the accessible text view.
//!
//! This crate holds everything below the accessibility tree itself:
//!
//! - The renderer boundary: [`StyledText`] run sequences and [`LineLayout`]
//!   snapshots supplied by the host's rich text renderer.
//! - Link extraction ([`collect_links`]) and link focus geometry
//!   ([`link_geometry`]).
//! - Style resolution ([`StyleResolver`]) against a font database.
//! - The host option record ([`TextViewOptions`]) with its wire decoding and
//!   per-field merge semantics.
//!
//! The companion crate `horizon-axview` builds the synthetic accessibility
//! tree on top of these types.

pub mod color;
pub mod error;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod links;
pub mod options;
pub mod run;
pub mod style;

pub use color::{ApiColor, Rgba};
pub use error::{Error, ErrorReport, Result};
pub use font::{FontDescriptor, FontRequest, FontStyle, FontWeight, StyleResolver};
pub use geometry::{link_geometry, FocusPath, LinkGeometry, PathCommand, Point, Rect, Size};
pub use layout::{ClusterPos, LaidLine, LineLayout};
pub use links::{collect_links, collect_links_in, LinkOccurrence};
pub use options::{AccessibilityBehavior, Brightness, TextViewOptions};
pub use run::{StyledRun, StyledText};
pub use style::{
    DecorationKind, DecorationStyle, FontSlant, OverflowPolicy, TextStyleOptions,
};
