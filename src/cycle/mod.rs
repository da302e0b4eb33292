pub mod envelope;
pub mod events;
pub mod fetch;
pub mod gate;
pub mod markup;
pub mod present;
pub mod reconcile;
pub mod view;

pub use envelope::{Failure, FailureKind, Payload, RequestEnvelope, ResponseEnvelope};
pub use events::{Click, Listeners, Subscription};
pub use fetch::{HttpTransport, JsonFetcher, Method, Transport};
pub use gate::{ControlId, RequestGate};
pub use markup::{Element, Markup};
pub use view::{BusyState, BusyStateView, Container, NodeKind, SubmitControl};

/// How one user action ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Busy,
    Invalid(String),
    Populated,
    Failed(Failure),
    /// The page was torn down while the request was in flight; the reply
    /// was dropped.
    Discarded,
}
