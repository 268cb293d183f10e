//! The synthetic accessibility tree.
//!
//! Every rebuild produces a fresh tree of paragraph containers and link
//! leaves from the current styled runs and line layout; the previous tree is
//! discarded wholesale. Nodes are owned synthetic values, never wrappers
//! around platform accessibility objects, and are projected into
//! [`accesskit`] nodes only at the platform boundary.
//!
//! Because nodes have no stable identity across rebuilds, assistive-technology
//! focus is carried over by content: a [`FocusIdentity`] captured before the
//! rebuild is searched for in the new tree, falling back to the first node so
//! focus never dangles on a disposed element.

use std::ops::Range;

use accesskit::{Action, Node, NodeId, Role, Tree, TreeUpdate};
use url::Url;

use horizon_axview_core::{
    collect_links_in, link_geometry, LineLayout, LinkGeometry, Rect, StyledText,
};

/// The AccessKit id of the synthetic root node.
pub const ROOT_NODE_ID: NodeId = NodeId(0);

/// Address of a node in the current tree.
///
/// Keys are positional and only valid against the tree they were read from;
/// a rebuild invalidates all outstanding keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    /// Index of the paragraph in reading order.
    pub paragraph: usize,
    /// Index of the link within the paragraph, or `None` for the paragraph
    /// node itself.
    pub link: Option<usize>,
}

impl NodeKey {
    /// Address a paragraph node.
    pub const fn paragraph(index: usize) -> Self {
        Self {
            paragraph: index,
            link: None,
        }
    }

    /// Address a link node.
    pub const fn link(paragraph: usize, link: usize) -> Self {
        Self {
            paragraph,
            link: Some(link),
        }
    }

    /// Whether this key addresses a paragraph node.
    pub const fn is_paragraph(&self) -> bool {
        self.link.is_none()
    }
}

/// A synthetic link leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkNode {
    /// The visible text of the link span.
    pub label: String,
    /// Where the link goes.
    pub destination: Url,
    /// Spoken hint derived from the destination scheme.
    pub hint: Option<String>,
    /// Byte range of the link text in the document.
    pub range: Range<usize>,
    /// On-screen geometry of the span.
    pub geometry: LinkGeometry,
}

/// A synthetic paragraph container.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphNode {
    /// The paragraph's visible text.
    pub label: String,
    /// Byte range of the paragraph in the document.
    pub range: Range<usize>,
    /// On-screen bounds of the paragraph, when any of it is laid out.
    pub bounds: Option<Rect>,
    /// Link children in reading order.
    pub links: Vec<LinkNode>,
}

/// The tree of synthetic accessibility nodes.
///
/// Paragraphs form the root sequence; links only ever appear as paragraph
/// children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccessibilityTree {
    paragraphs: Vec<ParagraphNode>,
}

impl AccessibilityTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The paragraph nodes in reading order.
    pub fn paragraphs(&self) -> &[ParagraphNode] {
        &self.paragraphs
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Total number of nodes (paragraphs plus links).
    pub fn node_count(&self) -> usize {
        self.paragraphs.len() + self.paragraphs.iter().map(|p| p.links.len()).sum::<usize>()
    }

    /// Get a paragraph by index.
    pub fn paragraph(&self, index: usize) -> Option<&ParagraphNode> {
        self.paragraphs.get(index)
    }

    /// Get the link a key addresses, if the key is a valid link key.
    pub fn link(&self, key: NodeKey) -> Option<&LinkNode> {
        let paragraph = self.paragraphs.get(key.paragraph)?;
        paragraph.links.get(key.link?)
    }

    /// Check if a key addresses an existing node.
    pub fn contains(&self, key: NodeKey) -> bool {
        match key.link {
            None => key.paragraph < self.paragraphs.len(),
            Some(_) => self.link(key).is_some(),
        }
    }

    /// The first node in reading order.
    pub fn first_node(&self) -> Option<NodeKey> {
        (!self.paragraphs.is_empty()).then(|| NodeKey::paragraph(0))
    }

    /// The first node that has at least one child.
    pub fn first_with_children(&self) -> Option<NodeKey> {
        self.paragraphs
            .iter()
            .position(|p| !p.links.is_empty())
            .map(NodeKey::paragraph)
    }

    /// The label of the node a key addresses.
    pub fn label(&self, key: NodeKey) -> Option<&str> {
        match key.link {
            None => self.paragraph(key.paragraph).map(|p| p.label.as_str()),
            Some(_) => self.link(key).map(|l| l.label.as_str()),
        }
    }

    /// Find the first node matching a focus identity, in reading order.
    pub fn find(&self, identity: &FocusIdentity) -> Option<NodeKey> {
        for (p, paragraph) in self.paragraphs.iter().enumerate() {
            if identity.destination.is_none() && paragraph.label == identity.label {
                return Some(NodeKey::paragraph(p));
            }
            for (l, link) in paragraph.links.iter().enumerate() {
                if identity.destination.as_ref() == Some(&link.destination)
                    && link.label == identity.label
                {
                    return Some(NodeKey::link(p, l));
                }
            }
        }
        None
    }
}

/// A content-derived key used to relocate "the same" node across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusIdentity {
    /// The node's label text.
    pub label: String,
    /// The link destination, or `None` for paragraph nodes.
    pub destination: Option<Url>,
}

impl FocusIdentity {
    /// Create an identity from label and destination.
    pub fn new(label: impl Into<String>, destination: Option<Url>) -> Self {
        Self {
            label: label.into(),
            destination,
        }
    }

    /// Capture the identity of the node a key addresses.
    pub fn of(tree: &AccessibilityTree, key: NodeKey) -> Option<Self> {
        match key.link {
            None => tree
                .paragraph(key.paragraph)
                .map(|p| Self::new(p.label.clone(), None)),
            Some(_) => tree
                .link(key)
                .map(|l| Self::new(l.label.clone(), Some(l.destination.clone()))),
        }
    }
}

/// The outcome of a synthetic activation.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// A link was activated; the host should open the destination.
    Open(Url),
    /// A paragraph was activated. Paragraph activation is absorbed here and
    /// must never fall through to a contained link.
    Handled,
    /// The key addressed no node.
    Ignored,
}

/// Perform a synthetic activation on the node a key addresses.
pub fn activate(tree: &AccessibilityTree, key: NodeKey) -> Activation {
    match key.link {
        Some(_) => match tree.link(key) {
            Some(link) => Activation::Open(link.destination.clone()),
            None => Activation::Ignored,
        },
        None if tree.paragraph(key.paragraph).is_some() => Activation::Handled,
        None => Activation::Ignored,
    }
}

/// Derive the spoken hint for a destination.
pub fn hint_for(destination: &Url) -> Option<String> {
    match destination.scheme() {
        "mailto" => Some("Compose e-mail.".to_string()),
        "tel" => Some("Dial phone number.".to_string()),
        "http" | "https" => Some(match destination.host_str() {
            Some(host) => format!("Open web site at {host}"),
            None => "Open web site.".to_string(),
        }),
        _ => None,
    }
}

/// The result of one rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    /// The freshly built tree.
    pub tree: AccessibilityTree,
    /// The node that should receive a focus-moved notification, if focus was
    /// inside the view before the rebuild.
    pub focus: Option<NodeKey>,
}

/// Build a fresh tree from the current document and line layout.
///
/// Total: an empty document yields an empty tree. Link occurrences without
/// on-screen geometry (scrolled out of the viewport) are omitted from the
/// tree until a later rebuild sees them laid out.
pub fn build_tree(
    doc: &StyledText,
    layout: &LineLayout,
    previous_focus: Option<&FocusIdentity>,
) -> BuildOutcome {
    let mut paragraphs = Vec::new();

    for range in doc.paragraph_ranges() {
        let label = doc.slice(range.clone()).trim_end_matches('\n').to_string();

        let mut links = Vec::new();
        for occurrence in collect_links_in(doc, range.clone()) {
            match link_geometry(layout, occurrence.range.clone()) {
                Some(geometry) => {
                    let hint = hint_for(&occurrence.destination);
                    links.push(LinkNode {
                        label: occurrence.display_text,
                        destination: occurrence.destination,
                        hint,
                        range: occurrence.range,
                        geometry,
                    });
                }
                None => {
                    tracing::trace!(
                        target: "horizon_axview::tree",
                        range = ?occurrence.range,
                        "link has no on-screen geometry, omitted"
                    );
                }
            }
        }

        let bounds = layout
            .selection_rects(range.start, range.end)
            .into_iter()
            .filter(|rect| !rect.is_empty())
            .reduce(|a, b| a.union(&b));

        paragraphs.push(ParagraphNode {
            label,
            range,
            bounds,
            links,
        });
    }

    let tree = AccessibilityTree { paragraphs };

    // Relocate focus by content; if the previously focused node is gone but
    // focus was inside the view, land on the first node rather than leaving
    // focus on a disposed element.
    let focus = previous_focus.map(|identity| {
        tree.find(identity)
            .or_else(|| tree.first_node())
            .unwrap_or(NodeKey::paragraph(0))
    });
    let focus = focus.filter(|key| tree.contains(*key));

    tracing::debug!(
        target: "horizon_axview::tree",
        paragraphs = tree.paragraphs.len(),
        nodes = tree.node_count(),
        focus = ?focus,
        "rebuilt accessibility tree"
    );

    BuildOutcome { tree, focus }
}

/// How the synthetic tree is exposed to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Paragraph containers with nested link children.
    #[default]
    Nested,
    /// Link nodes directly under the root, paragraphs omitted.
    Flattened,
}

/// The AccessKit id for a node key.
///
/// Ids are deterministic per position: identical tree shapes produce
/// identical updates. Paragraph indexes occupy the high bits, so the scheme
/// holds as long as a paragraph has fewer than 2^20 exposed links.
pub fn node_id(key: NodeKey) -> NodeId {
    let paragraph = (key.paragraph as u64 + 1) << 20;
    match key.link {
        None => NodeId(paragraph),
        Some(link) => NodeId(paragraph | (link as u64 + 1)),
    }
}

fn to_accesskit_rect(rect: Rect) -> accesskit::Rect {
    accesskit::Rect {
        x0: rect.min_x() as f64,
        y0: rect.min_y() as f64,
        x1: rect.max_x() as f64,
        y1: rect.max_y() as f64,
    }
}

fn link_accesskit_node(link: &LinkNode) -> Node {
    let mut node = Node::new(Role::Link);
    node.set_label(link.label.clone());
    if let Some(hint) = &link.hint {
        node.set_description(hint.clone());
    }
    node.set_bounds(to_accesskit_rect(link.geometry.bounds()));
    node.add_action(Action::Focus);
    node.add_action(Action::Click);
    node
}

/// Project the tree into an AccessKit tree update.
///
/// Pure over the single tree representation: the nested and flattened
/// variants are filters of the same nodes, not separate trees.
pub fn tree_update(
    tree: &AccessibilityTree,
    projection: Projection,
    focus: Option<NodeKey>,
) -> TreeUpdate {
    let mut nodes = Vec::new();
    let mut root_children = Vec::new();

    match projection {
        Projection::Nested => {
            for (p, paragraph) in tree.paragraphs().iter().enumerate() {
                let paragraph_id = node_id(NodeKey::paragraph(p));
                let mut node = Node::new(Role::Paragraph);
                node.set_label(paragraph.label.clone());
                if let Some(bounds) = paragraph.bounds {
                    node.set_bounds(to_accesskit_rect(bounds));
                }
                node.add_action(Action::Focus);

                let mut children = Vec::new();
                for (l, link) in paragraph.links.iter().enumerate() {
                    let link_id = node_id(NodeKey::link(p, l));
                    nodes.push((link_id, link_accesskit_node(link)));
                    children.push(link_id);
                }
                node.set_children(children);

                nodes.push((paragraph_id, node));
                root_children.push(paragraph_id);
            }
        }
        Projection::Flattened => {
            for (p, paragraph) in tree.paragraphs().iter().enumerate() {
                for (l, link) in paragraph.links.iter().enumerate() {
                    let link_id = node_id(NodeKey::link(p, l));
                    nodes.push((link_id, link_accesskit_node(link)));
                    root_children.push(link_id);
                }
            }
        }
    }

    let mut root = Node::new(Role::Document);
    root.set_children(root_children);
    nodes.push((ROOT_NODE_ID, root));

    let focus = focus
        .filter(|key| tree.contains(*key))
        .map(node_id)
        .unwrap_or(ROOT_NODE_ID);

    TreeUpdate {
        nodes,
        tree: Some(Tree::new(ROOT_NODE_ID)),
        focus,
    }
}
