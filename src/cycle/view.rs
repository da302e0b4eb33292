use crate::cycle::events::Subscription;
use crate::cycle::markup::Markup;
use crate::cycle::{present, reconcile};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Result,
    Error,
    Message,
    Notice,
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub markup: Markup,
    bindings: Vec<Subscription>,
}

impl Node {
    pub fn new(kind: NodeKind, markup: Markup) -> Self {
        Self {
            kind,
            markup,
            bindings: Vec::new(),
        }
    }

    pub fn bound(mut self, bindings: Vec<Subscription>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

#[derive(Debug, Default)]
pub struct Container {
    nodes: Vec<Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|node| node.kind == kind).count()
    }

    pub fn html(&self) -> String {
        self.nodes.iter().map(|node| node.markup.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyState {
    Idle,
    Loading,
    Populated,
    Failed,
}

impl BusyState {
    pub fn can_advance_to(self, next: BusyState) -> bool {
        use BusyState::*;
        matches!(
            (self, next),
            (Idle, Loading) | (Loading, Populated) | (Loading, Failed) | (Populated, Idle) | (Failed, Idle)
        )
    }
}

/// Owns one container, its loading indicator and its empty placeholder.
/// Rendering code reaches the container only through the transitions below.
#[derive(Debug)]
pub struct BusyStateView {
    state: BusyState,
    outcome: Option<BusyState>,
    container: Container,
    loading_visible: bool,
    placeholder_visible: bool,
}

impl Default for BusyStateView {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyStateView {
    pub fn new() -> Self {
        Self {
            state: BusyState::Idle,
            outcome: None,
            container: Container::new(),
            loading_visible: false,
            placeholder_visible: true,
        }
    }

    pub fn state(&self) -> BusyState {
        self.state
    }

    pub fn outcome(&self) -> Option<BusyState> {
        self.outcome
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.placeholder_visible
    }

    fn advance(&mut self, next: BusyState) -> bool {
        if !self.state.can_advance_to(next) {
            warn!(from = ?self.state, to = ?next, "ignoring invalid busy-state transition");
            return false;
        }
        self.state = next;
        true
    }

    pub fn begin(&mut self) -> bool {
        if !self.advance(BusyState::Loading) {
            return false;
        }
        self.container.clear();
        self.placeholder_visible = false;
        self.loading_visible = true;
        true
    }

    pub fn populate<T, F>(&mut self, items: impl IntoIterator<Item = T>, render_item: F) -> bool
    where
        F: FnMut(T) -> Markup,
    {
        if !self.advance(BusyState::Populated) {
            return false;
        }
        self.loading_visible = false;
        reconcile::render(&mut self.container, items, render_item);
        true
    }

    pub fn populate_bound<T, F>(&mut self, items: impl IntoIterator<Item = T>, render_item: F) -> bool
    where
        F: FnMut(T) -> (Markup, Vec<Subscription>),
    {
        if !self.advance(BusyState::Populated) {
            return false;
        }
        self.loading_visible = false;
        reconcile::render_bound(&mut self.container, items, render_item);
        true
    }

    pub fn fail(&mut self, message: &str) -> bool {
        self.fail_titled(None, message)
    }

    pub fn fail_titled(&mut self, title: Option<(&str, &str)>, message: &str) -> bool {
        if !self.advance(BusyState::Failed) {
            return false;
        }
        self.loading_visible = false;
        match title {
            Some((icon, title)) => present::present_titled(&mut self.container, icon, title, message),
            None => present::present(&mut self.container, message),
        }
        true
    }

    /// Populated | Failed → Idle. Rendered content stays in place.
    pub fn settle(&mut self) {
        let finished = self.state;
        if self.advance(BusyState::Idle) {
            self.outcome = Some(finished);
        }
        self.loading_visible = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    disabled: bool,
    label: &'static str,
    idle_label: &'static str,
    busy_label: &'static str,
    hint: Option<String>,
}

impl SubmitControl {
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            disabled: false,
            label: idle_label,
            idle_label,
            busy_label,
            hint: None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = Some(hint.into());
    }

    pub fn lock(&mut self) {
        self.disabled = true;
        self.label = self.busy_label;
        self.hint = None;
    }

    pub fn unlock(&mut self) {
        self.disabled = false;
        self.label = self.idle_label;
    }
}
