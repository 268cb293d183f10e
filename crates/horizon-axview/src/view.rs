//! The accessible text view facade.
//!
//! [`AccessibleTextView`] owns everything a single embedded view needs: the
//! merged option record, the styled content and line layout handed over by
//! the host renderer, the current synthetic tree, the rebuild scheduler, and
//! the platform bridge. It is single-threaded by design; a multi-threaded
//! host must marshal every call onto the view's owner context.
//!
//! Timing is pulled from the host event loop: triggers pass in the loop's
//! clock, [`AccessibleTextView::time_until_due`] says how long to wait, and
//! [`AccessibleTextView::process_due`] runs the coalesced rebuild.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use accesskit::TreeUpdate;
use url::Url;

use horizon_axview_core::{
    AccessibilityBehavior, Error, FontDescriptor, FontWeight, LineLayout, Result, StyleResolver,
    StyledText, TextViewOptions,
};

use crate::height::HeightReporter;
use crate::platform::{AssistiveBridge, FacilityProbe, InertBridge, ProbeOutcome};
use crate::rotor::{self, RotorDirection};
use crate::schedule::UpdateScheduler;
use crate::tree::{
    self, build_tree, node_id, AccessibilityTree, Activation, FocusIdentity, LinkNode, NodeKey,
    Projection,
};

/// Callback invoked with the height the host should reserve.
pub type HeightListener = Box<dyn FnMut(f32)>;

/// One embedded accessible text view.
pub struct AccessibleTextView {
    options: TextViewOptions,
    resolver: StyleResolver,
    content: Option<StyledText>,
    layout: Option<LineLayout>,
    tree: AccessibilityTree,
    focused: Option<FocusIdentity>,
    scheduler: UpdateScheduler,
    height: HeightReporter,
    probe: FacilityProbe,
    bridge: Box<dyn AssistiveBridge>,
    height_listener: Option<HeightListener>,
}

impl AccessibleTextView {
    /// Create a view with an inert platform bridge and an empty font
    /// database.
    pub fn new() -> Self {
        Self {
            options: TextViewOptions::default(),
            resolver: StyleResolver::empty(),
            content: None,
            layout: None,
            tree: AccessibilityTree::new(),
            focused: None,
            scheduler: UpdateScheduler::new(),
            height: HeightReporter::new(),
            probe: FacilityProbe::new(),
            bridge: Box::new(InertBridge),
            height_listener: None,
        }
    }

    /// Install the platform bridge.
    pub fn set_bridge(&mut self, bridge: impl AssistiveBridge + 'static) {
        self.bridge = Box::new(bridge);
    }

    /// Install the style resolver (font database).
    pub fn set_resolver(&mut self, resolver: StyleResolver) {
        self.resolver = resolver;
    }

    /// Replace the facility retry budget.
    pub fn set_facility_probe(&mut self, probe: FacilityProbe) {
        self.probe = probe;
    }

    /// Install the height callback.
    pub fn on_height(&mut self, listener: impl FnMut(f32) + 'static) {
        self.height_listener = Some(Box::new(listener));
    }

    /// The current merged option record.
    pub fn options(&self) -> &TextViewOptions {
        &self.options
    }

    /// Apply a JSON-encoded options record from the host channel.
    ///
    /// See [`AccessibleTextView::set_options`] for the merge and error
    /// semantics.
    pub fn set_options_json(&mut self, json: &str, now: Instant) -> Result<()> {
        self.set_options(TextViewOptions::from_json(json), now)
    }

    /// Apply an options record.
    ///
    /// Present fields overlay the previous record; absent fields keep their
    /// values. A record that failed to decode is rejected without touching
    /// the previous state. A merged record with blank markup surfaces an
    /// empty-content error to this call and empties the tree.
    pub fn set_options(&mut self, incoming: TextViewOptions, now: Instant) -> Result<()> {
        if let Some(report) = incoming.error_report() {
            return Err(Error::option_decode(report.message));
        }

        self.options = self.options.merged_with(incoming);

        if !self.options.has_content() {
            // Blank markup renders nothing: drop the stale document and any
            // rebuild still in flight so the empty tree stays empty.
            self.scheduler.cancel_pending();
            self.content = None;
            self.tree = AccessibilityTree::new();
            return Err(Error::EmptyContent);
        }

        tracing::debug!(target: "horizon_axview::view", "options applied");
        self.scheduler.request(now, UpdateScheduler::CONTENT_WINDOW);
        Ok(())
    }

    /// The resolved font for body text.
    pub fn text_font(&self) -> FontDescriptor {
        let style = self.options.text_style.clone().unwrap_or_default();
        let request = style.font_request(FontWeight::NORMAL, self.options.text_scale_factor);
        self.resolver.resolve(&request)
    }

    /// The resolved font for link text.
    ///
    /// A link style without an explicit weight inherits the body text
    /// weight.
    pub fn link_font(&self) -> FontDescriptor {
        let text_style = self.options.text_style.clone().unwrap_or_default();
        let link_style = self.options.link_style.clone().unwrap_or_default();
        let request = link_style.font_request(
            text_style.weight_or(FontWeight::NORMAL),
            self.options.text_scale_factor,
        );
        self.resolver.resolve(&request)
    }

    /// The line budget for the renderer: minimum lines to reserve, maximum
    /// lines before truncation (`None` = unbounded).
    pub fn line_limits(&self) -> (Option<u32>, Option<NonZeroU32>) {
        (self.options.min_lines, self.options.effective_max_lines())
    }

    /// Attach freshly rendered content and its layout.
    pub fn set_content(&mut self, content: StyledText, layout: LineLayout, now: Instant) {
        self.content = Some(content);
        self.report_height(&layout);
        self.layout = Some(layout);
        self.scheduler.request(now, UpdateScheduler::CONTENT_WINDOW);
    }

    /// Record a completed layout pass over the current content.
    pub fn layout_updated(&mut self, layout: LineLayout, now: Instant) {
        self.report_height(&layout);
        self.layout = Some(layout);
        self.scheduler.request(now, UpdateScheduler::SETTLE_WINDOW);
    }

    /// Record a scroll position change.
    pub fn notify_scrolled(&mut self, now: Instant) {
        self.scheduler.request(now, UpdateScheduler::SCROLL_WINDOW);
    }

    /// Record an assistive-technology status change (screen reader or
    /// switch input toggled).
    pub fn assistive_status_changed(&mut self, now: Instant) {
        self.scheduler.request(now, UpdateScheduler::SETTLE_WINDOW);
    }

    /// Time until the pending rebuild is due, or `None` when idle.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    /// Run the pending rebuild if its quiescence window has elapsed.
    ///
    /// Returns whether a rebuild ran.
    pub fn process_due(&mut self, now: Instant) -> bool {
        if !self.scheduler.fire_due(now) {
            return false;
        }
        self.rebuild_now(now);
        true
    }

    /// Rebuild the synthetic tree immediately.
    ///
    /// Total: missing content or layout yields an empty tree. The new tree
    /// is swapped in only after it is fully built, and at most one
    /// focus-moved notification is posted per rebuild.
    pub fn rebuild_now(&mut self, now: Instant) {
        let outcome = match (&self.content, &self.layout) {
            (Some(content), Some(layout)) => build_tree(content, layout, self.focused.as_ref()),
            _ => {
                self.tree = AccessibilityTree::new();
                return;
            }
        };

        self.tree = outcome.tree;

        if let Some(key) = outcome.focus {
            self.focused = FocusIdentity::of(&self.tree, key);
            self.post_focus(key, now);
        }
    }

    fn post_focus(&mut self, key: NodeKey, now: Instant) {
        match self.probe.probe(self.bridge.facility_ready()) {
            ProbeOutcome::Ready => self.bridge.focus_moved(node_id(key)),
            ProbeOutcome::RetryAfter(delay) => {
                // Rebuild again once the facility has had time to appear.
                self.scheduler.request(now, delay);
            }
            ProbeOutcome::GaveUp => {}
        }
    }

    fn report_height(&mut self, layout: &LineLayout) {
        let Some(listener) = &mut self.height_listener else {
            return;
        };
        if let Some(height) = self.height.observe(layout) {
            listener(height);
        }
    }

    /// The current synthetic tree.
    pub fn tree(&self) -> &AccessibilityTree {
        &self.tree
    }

    /// Every link in the current tree, in reading order, for hosts that
    /// surface a links menu.
    pub fn links(&self) -> Vec<&LinkNode> {
        self.tree
            .paragraphs()
            .iter()
            .flat_map(|paragraph| paragraph.links.iter())
            .collect()
    }

    /// Record that assistive-technology focus landed on a node, so its
    /// identity survives the next rebuild.
    pub fn note_focused(&mut self, key: NodeKey) {
        self.focused = FocusIdentity::of(&self.tree, key);
    }

    /// Record that assistive-technology focus left the view.
    pub fn note_unfocused(&mut self) {
        self.focused = None;
    }

    /// The node currently considered focused, if it exists in the current
    /// tree.
    pub fn focus_target(&self) -> Option<NodeKey> {
        self.focused.as_ref().and_then(|id| self.tree.find(id))
    }

    fn projection(&self) -> Projection {
        if self.options.flatten_hierarchy == Some(true) {
            Projection::Flattened
        } else {
            Projection::Nested
        }
    }

    /// The AccessKit update exposing the current tree, or `None` when the
    /// active presentation mode leaves the platform text element alone.
    pub fn tree_update(&self) -> Option<TreeUpdate> {
        let behavior = self.options.accessibility_behavior.unwrap_or_default();
        let focus = self.focus_target();

        match behavior {
            AccessibilityBehavior::PlatformDefault => None,
            AccessibilityBehavior::PlatformDefaultPlusLinksLongPressMenu => self
                .bridge
                .switch_access_active()
                .then(|| tree::tree_update(&self.tree, Projection::Flattened, focus)),
            AccessibilityBehavior::LinksAsFocusNodes => {
                Some(tree::tree_update(&self.tree, self.projection(), focus))
            }
        }
    }

    /// Resolve a rotor navigation event against the current tree.
    pub fn navigate(
        &self,
        direction: RotorDirection,
        current: NodeKey,
        native: Option<NodeKey>,
    ) -> Option<NodeKey> {
        rotor::navigate(&self.tree, direction, current, native)
    }

    /// Perform a synthetic activation.
    ///
    /// Link activations are also forwarded to the platform bridge for
    /// opening.
    pub fn activate(&mut self, key: NodeKey) -> Activation {
        let activation = tree::activate(&self.tree, key);
        if let Activation::Open(destination) = &activation {
            self.bridge.open_destination(destination);
        }
        activation
    }

    /// Open a destination through the platform bridge.
    pub fn open_destination(&mut self, destination: &Url) -> bool {
        self.bridge.open_destination(destination)
    }

    /// The last height reported to the host, if any.
    pub fn reported_height(&self) -> Option<f32> {
        self.height.last_reported()
    }
}

impl Default for AccessibleTextView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_axview_core::{LaidLine, StyledRun};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn sample_content() -> (StyledText, LineLayout) {
        let mut doc = StyledText::new("Visit our site today.");
        doc.push_run(StyledRun::new(0..6));
        doc.push_run(StyledRun::new(6..14).with_destination(url("https://example.com")));
        doc.push_run(StyledRun::new(14..21));
        let layout = LineLayout::new(vec![LaidLine::uniform(0..21, 0.0, 0.0, 16.0, 8.0)], 4.0);
        (doc, layout)
    }

    fn ready_view() -> (AccessibleTextView, Instant) {
        let mut view = AccessibleTextView::new();
        let t0 = Instant::now();
        view.set_options_json(
            r#"{ "html": "<p>Visit our site today.</p>", "accessibilityBehavior": "linksAsFocusNodes" }"#,
            t0,
        )
        .unwrap();
        let (doc, layout) = sample_content();
        view.set_content(doc, layout, t0);
        (view, t0)
    }

    #[test]
    fn decode_failure_leaves_previous_options_untouched() {
        let (mut view, t0) = ready_view();
        let before = view.options().clone();

        let err = view.set_options_json("{broken", t0).unwrap_err();
        assert_eq!(err.report().code, "JSONError");
        assert_eq!(view.options(), &before);
    }

    #[test]
    fn blank_html_errors_and_empties_the_tree() {
        let (mut view, t0) = ready_view();
        view.process_due(t0 + Duration::from_secs(2));
        assert!(!view.tree().is_empty());

        let err = view
            .set_options_json(r#"{ "html": "" }"#, t0)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyContent));
        assert!(view.tree().is_empty());
    }

    #[test]
    fn triggers_coalesce_into_one_rebuild() {
        let (mut view, t0) = ready_view();

        view.notify_scrolled(t0);
        view.notify_scrolled(t0 + Duration::from_millis(10));
        view.notify_scrolled(t0 + Duration::from_millis(20));

        assert!(view.process_due(t0 + Duration::from_millis(500)));
        // The single fire consumed every request.
        assert!(!view.process_due(t0 + Duration::from_millis(900)));
        assert_eq!(view.tree().node_count(), 2);
    }

    #[test]
    fn background_only_update_preserves_tree_and_focus() {
        let (mut view, t0) = ready_view();
        view.process_due(t0 + Duration::from_secs(2));

        view.note_focused(NodeKey::link(0, 0));
        let before = view.tree().clone();

        view.set_options_json(r#"{ "backgroundColor": [255, 10, 20, 30] }"#, t0)
            .unwrap();
        view.process_due(t0 + Duration::from_secs(4));

        assert_eq!(view.tree(), &before);
        assert_eq!(view.focus_target(), Some(NodeKey::link(0, 0)));
        assert!(view.options().background_color.is_some());
    }

    #[test]
    fn platform_default_exposes_no_synthetic_tree() {
        let mut view = AccessibleTextView::new();
        let t0 = Instant::now();
        view.set_options_json(r#"{ "html": "<p>x</p>" }"#, t0).unwrap();
        let (doc, layout) = sample_content();
        view.set_content(doc, layout, t0);
        view.process_due(t0 + Duration::from_secs(2));

        assert!(!view.tree().is_empty());
        assert!(view.tree_update().is_none());
    }

    #[test]
    fn focus_notification_is_posted_after_rebuild() {
        #[derive(Default, Clone)]
        struct RecordingBridge {
            moves: Rc<RefCell<Vec<accesskit::NodeId>>>,
        }
        impl AssistiveBridge for RecordingBridge {
            fn focus_moved(&mut self, node: accesskit::NodeId) {
                self.moves.borrow_mut().push(node);
            }
        }

        let (mut view, t0) = ready_view();
        let bridge = RecordingBridge::default();
        let moves = bridge.moves.clone();
        view.set_bridge(bridge);

        view.process_due(t0 + Duration::from_secs(2));
        view.note_focused(NodeKey::link(0, 0));

        // Content replaced; focus identity carries over and one
        // notification targets the relocated node.
        let (doc, layout) = sample_content();
        view.set_content(doc, layout, t0 + Duration::from_secs(3));
        view.process_due(t0 + Duration::from_secs(5));

        assert_eq!(
            moves.borrow().as_slice(),
            &[node_id(NodeKey::link(0, 0))]
        );
    }

    #[test]
    fn link_font_inherits_text_weight() {
        let mut view = AccessibleTextView::new();
        let t0 = Instant::now();
        view.set_options_json(
            r#"{ "html": "x", "textStyle": { "fontWeight": 600 }, "linkStyle": { "decoration": "underline" } }"#,
            t0,
        )
        .unwrap();

        assert_eq!(view.text_font().weight, FontWeight::SEMI_BOLD);
        assert_eq!(view.link_font().weight, FontWeight::SEMI_BOLD);
    }

    #[test]
    fn height_is_reported_once_per_change() {
        let mut view = AccessibleTextView::new();
        let t0 = Instant::now();
        let reports: Rc<RefCell<Vec<f32>>> = Rc::default();
        let sink = reports.clone();
        view.on_height(move |h| sink.borrow_mut().push(h));

        view.set_options_json(r#"{ "html": "x" }"#, t0).unwrap();
        let (doc, layout) = sample_content();
        view.set_content(doc, layout.clone(), t0);
        view.layout_updated(layout.clone(), t0 + Duration::from_millis(10));

        // One line of 16px plus 4px trailing leading, reported once.
        assert_eq!(reports.borrow().as_slice(), &[20.0]);
        assert_eq!(view.reported_height(), Some(20.0));
    }
}
