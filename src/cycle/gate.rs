use parking_lot::Mutex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlId(Cow<'static, str>);

impl ControlId {
    pub const fn fixed(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestGate {
    in_flight: Mutex<HashSet<ControlId>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admit(&self, control: &ControlId) -> bool {
        self.in_flight.lock().insert(control.clone())
    }

    pub fn release(&self, control: &ControlId) {
        self.in_flight.lock().remove(control);
    }

    pub fn is_busy(&self, control: &ControlId) -> bool {
        self.in_flight.lock().contains(control)
    }

    /// Admits `control` and returns a pass that releases it on drop, covering
    /// early returns and unwinding.
    pub fn enter(&self, control: &ControlId) -> Option<GatePass<'_>> {
        if !self.admit(control) {
            tracing::debug!(%control, "request already in flight, dropping");
            return None;
        }
        Some(GatePass {
            gate: self,
            control: control.clone(),
        })
    }
}

#[derive(Debug)]
pub struct GatePass<'a> {
    gate: &'a RequestGate,
    control: ControlId,
}

impl Drop for GatePass<'_> {
    fn drop(&mut self) {
        self.gate.release(&self.control);
    }
}
