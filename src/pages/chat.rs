use crate::config::ClientConfig;
use crate::cycle::markup::{icon, Element, Markup};
use crate::cycle::view::{Node, NodeKind};
use crate::cycle::{
    reconcile, BusyStateView, Click, Container, ControlId, FailureKind, JsonFetcher, Listeners,
    Method, RequestEnvelope, RequestGate, ResponseEnvelope, Settled, SubmitControl, Transport,
};
use crate::models::ChatReply;
use crate::session::{ConversationSession, Role};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

const SEND_CONTROL: ControlId = ControlId::fixed("sendButton");

pub const EMPTY_MESSAGE_HINT: &str = "Digite uma mensagem.";
pub const CONNECTION_MESSAGE: &str = "Erro de conexão. Verifique sua internet e tente novamente.";
const APPLICATION_PREFIX: &str = "Desculpe, ocorreu um erro: ";
const APPLICATION_FALLBACK: &str = "Tente novamente.";

#[derive(Debug)]
pub struct ChatView {
    pub transcript: Container,
    pub status: BusyStateView,
    pub suggestions: Container,
    pub input: String,
    pub input_disabled: bool,
    pub send: SubmitControl,
    pub session: ConversationSession,
    pub empty_state_visible: bool,
}

impl ChatView {
    fn new() -> Self {
        Self {
            transcript: Container::new(),
            status: BusyStateView::new(),
            suggestions: Container::new(),
            input: String::new(),
            input_disabled: false,
            send: SubmitControl::new("Enviar", "Enviando..."),
            session: ConversationSession::new(),
            empty_state_visible: true,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.status.is_loading_visible()
    }

    fn append_message(&mut self, role: Role, content: Markup) {
        self.empty_state_visible = false;
        let (class, avatar) = match role {
            Role::User => ("message user", "person"),
            Role::Assistant => ("message assistant", "cpu"),
        };
        let markup = Element::new("div")
            .class(class)
            .child(
                Element::new("div")
                    .class("message-content-wrapper")
                    .child(Element::new("div").class("message-avatar").child(icon(avatar)))
                    .child(Element::new("div").class("message-content").child(content)),
            )
            .build();
        self.transcript.append(Node::new(NodeKind::Message, markup));
    }
}

pub struct ChatPage<T> {
    url: String,
    csrf_token: String,
    fetcher: JsonFetcher<T>,
    gate: RequestGate,
    view: Arc<Mutex<ChatView>>,
    // Bumped on teardown; replies admitted under an older lifetime are dropped.
    lifetime: AtomicU64,
    picked_tx: UnboundedSender<String>,
    picked_rx: Mutex<UnboundedReceiver<String>>,
}

impl<T: Transport> ChatPage<T> {
    pub fn new(transport: T, url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        let (picked_tx, picked_rx) = mpsc::unbounded_channel();
        Self {
            url: url.into(),
            csrf_token: csrf_token.into(),
            fetcher: JsonFetcher::new(transport),
            gate: RequestGate::new(),
            view: Arc::new(Mutex::new(ChatView::new())),
            lifetime: AtomicU64::new(0),
            picked_tx,
            picked_rx: Mutex::new(picked_rx),
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(transport, config.chat_url(), config.csrf_token.clone())
    }

    pub fn view(&self) -> MutexGuard<'_, ChatView> {
        self.view.lock()
    }

    pub fn type_message(&self, text: &str) {
        self.view.lock().input = text.to_string();
    }

    pub async fn send_message(&self) -> Settled {
        let message = self.view.lock().input.trim().to_string();
        if message.is_empty() {
            self.view.lock().send.set_hint(EMPTY_MESSAGE_HINT);
            return Settled::Invalid(EMPTY_MESSAGE_HINT.to_string());
        }

        let Some(_pass) = self.gate.enter(&SEND_CONTROL) else {
            return Settled::Busy;
        };
        let lifetime = self.lifetime.load(Ordering::SeqCst);

        let body = {
            let mut view = self.view.lock();
            view.input_disabled = true;
            view.send.lock();
            view.append_message(Role::User, Markup::text(&message));
            view.session.push(Role::User, message.as_str());
            view.input.clear();
            view.status.begin();
            RequestEnvelope::builder()
                .field("message", message.as_str())
                .serialized("conversation_history", &view.session.turns())
                .build()
        };

        debug!(chars = message.chars().count(), "sending chat message");
        let envelope = self
            .fetcher
            .send(&self.url, Method::Post, Some(&body), &self.csrf_token)
            .await;

        let mut view = self.view.lock();
        if self.lifetime.load(Ordering::SeqCst) != lifetime {
            warn!("chat page torn down while a message was in flight; reply dropped");
            return Settled::Discarded;
        }
        let settled = match envelope {
            ResponseEnvelope::Success(payload) => {
                let reply: ChatReply = payload.decode().unwrap_or_default();
                let content = if reply.response_html.trim().is_empty() {
                    Markup::text(&reply.response)
                } else {
                    Markup::trusted(reply.response_html)
                };
                view.append_message(Role::Assistant, content);
                view.session.push(Role::Assistant, reply.response);
                view.status.populate(Vec::<Markup>::new(), |markup| markup);
                info!(turns = view.session.len(), demo = reply.is_demo, "chat reply rendered");
                Settled::Populated
            }
            ResponseEnvelope::Failure(failure) => {
                let text = match failure.kind {
                    FailureKind::Transport => CONNECTION_MESSAGE.to_string(),
                    _ => format!(
                        "{APPLICATION_PREFIX}{}",
                        failure.message_or(APPLICATION_FALLBACK)
                    ),
                };
                view.status.fail(&text);
                Settled::Failed(failure)
            }
        };

        view.status.settle();
        view.input_disabled = false;
        view.send.unlock();
        settled
    }

    /// Renders suggestion chips. A click copies its text into the input and
    /// queues it for [`ChatPage::send_picked`]. Re-rendering releases the
    /// previous chips' listeners.
    pub fn render_suggestions(&self, suggestions: &[&str], clicks: &Listeners<Click>) {
        let weak: Weak<Mutex<ChatView>> = Arc::downgrade(&self.view);
        let mut view = self.view.lock();
        reconcile::render_bound(&mut view.suggestions, suggestions, |suggestion| {
            let text = suggestion.to_string();
            let view = Weak::clone(&weak);
            let picked = self.picked_tx.clone();
            let subscription = clicks.subscribe(move |click| {
                if click.target != text {
                    return;
                }
                if let Some(view) = view.upgrade() {
                    view.lock().input = text.clone();
                    let _ = picked.send(text.clone());
                }
            });
            let chip = Element::new("button")
                .class("js-suggestion")
                .attr("data-suggestion", suggestion)
                .text(suggestion)
                .build();
            (chip, vec![subscription])
        });
    }

    /// Sends every clicked suggestion, in click order, through the same path
    /// as a typed message.
    pub async fn send_picked(&self) -> Vec<Settled> {
        let mut results = Vec::new();
        loop {
            let next = self.picked_rx.lock().try_recv().ok();
            let Some(text) = next else {
                break;
            };
            self.type_message(&text);
            results.push(self.send_message().await);
        }
        results
    }

    /// Leaves the page: drops every binding and the conversation.
    pub fn teardown(&self) {
        let mut view = self.view.lock();
        self.lifetime.fetch_add(1, Ordering::SeqCst);
        *view = ChatView::new();
        while self.picked_rx.lock().try_recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::fetch::testing::{Scripted, ScriptedTransport};
    use crate::cycle::BusyState;
    use serde_json::json;

    fn page(transport: &ScriptedTransport) -> ChatPage<ScriptedTransport> {
        ChatPage::new(transport.clone(), "/api/chat/", "csrf-123")
    }

    #[tokio::test]
    async fn exchange_appends_both_turns() {
        let transport = ScriptedTransport::json(json!({"success": true, "response": "Olá!"}));
        let chat = page(&transport);

        chat.type_message("oi");
        assert_eq!(chat.send_message().await, Settled::Populated);

        let view = chat.view();
        assert_eq!(view.transcript.count(NodeKind::Message), 2);
        assert_eq!(view.session.len(), 2);
        assert_eq!(view.session.turns()[0].content, "oi");
        assert_eq!(view.session.turns()[1].content, "Olá!");
        assert!(view.transcript.html().contains("Olá!"));
        assert!(!view.empty_state_visible);
        assert_eq!(view.input, "");
        assert!(!view.input_disabled);

        let body = transport.body_of(0);
        assert_eq!(body["message"], "oi");
        assert_eq!(body["conversation_history"][0]["role"], "user");
    }

    #[tokio::test]
    async fn response_html_is_trusted_and_plain_response_is_escaped() {
        let transport = ScriptedTransport::new([
            Scripted::Json(
                200,
                json!({"success": true, "response": "x", "response_html": "<p><strong>ok</strong></p>"}),
            ),
            Scripted::Json(200, json!({"success": true, "response": "<b>raw</b>"})),
        ]);
        let chat = page(&transport);

        chat.type_message("a");
        chat.send_message().await;
        chat.type_message("b");
        chat.send_message().await;

        let html = chat.view().transcript.html();
        assert!(html.contains("<p><strong>ok</strong></p>"));
        assert!(html.contains("&lt;b&gt;raw&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_request() {
        let transport = ScriptedTransport::default();
        let chat = page(&transport);

        chat.type_message("   ");
        let settled = chat.send_message().await;

        assert_eq!(settled, Settled::Invalid(EMPTY_MESSAGE_HINT.to_string()));
        assert_eq!(transport.calls(), 0);
        assert_eq!(chat.view().send.hint(), Some(EMPTY_MESSAGE_HINT));
    }

    #[tokio::test]
    async fn spam_while_in_flight_issues_one_request() {
        let transport = ScriptedTransport::json(json!({"success": true, "response": "ok"}));
        let chat = page(&transport);

        chat.type_message("primeira");
        let spam = async {
            let mut results = Vec::new();
            for _ in 0..5 {
                chat.type_message("de novo");
                results.push(chat.send_message().await);
            }
            results
        };
        let (first, rest) = tokio::join!(chat.send_message(), spam);

        assert_eq!(first, Settled::Populated);
        assert!(rest.iter().all(|settled| *settled == Settled::Busy));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn application_error_is_presented_escaped() {
        let transport =
            ScriptedTransport::json(json!({"success": false, "error": "<i>limite</i>"}));
        let chat = page(&transport);

        chat.type_message("oi");
        chat.send_message().await;

        let view = chat.view();
        let html = view.status.container().html();
        assert!(html.contains("Desculpe, ocorreu um erro: &lt;i&gt;limite&lt;/i&gt;"));
        assert_eq!(view.status.container().count(NodeKind::Error), 1);
        assert_eq!(view.session.len(), 1);
    }

    #[tokio::test]
    async fn connection_failure_reenables_controls() {
        let transport = ScriptedTransport::new([Scripted::Unreachable]);
        let chat = page(&transport);

        chat.type_message("oi");
        let settled = chat.send_message().await;

        assert!(matches!(settled, Settled::Failed(ref f) if f.kind == FailureKind::Transport));
        let view = chat.view();
        assert!(view.status.container().html().contains(CONNECTION_MESSAGE));
        assert_eq!(view.status.state(), BusyState::Idle);
        assert!(!view.is_typing());
        assert!(!view.input_disabled);
        assert!(!view.send.is_disabled());
    }

    #[tokio::test]
    async fn next_send_clears_previous_error() {
        let transport = ScriptedTransport::new([
            Scripted::Unreachable,
            Scripted::Json(200, json!({"success": true, "response": "voltou"})),
        ]);
        let chat = page(&transport);

        chat.type_message("oi");
        chat.send_message().await;
        chat.type_message("oi de novo");
        chat.send_message().await;

        let view = chat.view();
        assert!(view.status.container().is_empty());
        assert_eq!(view.status.outcome(), Some(BusyState::Populated));
    }

    #[tokio::test]
    async fn teardown_while_in_flight_drops_the_reply() {
        let transport = ScriptedTransport::new([
            Scripted::Json(200, json!({"success": true, "response": "tarde"})),
            Scripted::Json(200, json!({"success": true, "response": "de novo"})),
        ]);
        let chat = page(&transport);

        chat.type_message("boa");
        let (settled, ()) = tokio::join!(chat.send_message(), async { chat.teardown() });

        assert_eq!(settled, Settled::Discarded);
        {
            let view = chat.view();
            assert!(view.session.is_empty());
            assert!(view.transcript.is_empty());
            assert_eq!(view.status.state(), BusyState::Idle);
            assert_eq!(view.status.outcome(), None);
            assert!(!view.send.is_disabled());
        }

        chat.type_message("oi");
        assert_eq!(chat.send_message().await, Settled::Populated);
        assert_eq!(chat.view().session.len(), 2);
    }

    #[tokio::test]
    async fn clicked_suggestion_is_sent_once() {
        let transport = ScriptedTransport::json(json!({"success": true, "response": "claro"}));
        let chat = page(&transport);
        let clicks = Listeners::<Click>::new();
        chat.render_suggestions(&["Como aumentar vendas?", "Ideias de posts"], &clicks);

        clicks.emit(&Click::on("Ideias de posts"));
        let sent = chat.send_picked().await;

        assert_eq!(sent, vec![Settled::Populated]);
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.body_of(0)["message"], "Ideias de posts");
        assert_eq!(chat.view().session.len(), 2);
        assert!(chat.send_picked().await.is_empty());
    }

    #[test]
    fn suggestions_fill_input_and_rerender_does_not_accumulate() {
        let chat = page(&ScriptedTransport::default());
        let clicks = Listeners::<Click>::new();

        chat.render_suggestions(&["Como aumentar vendas?", "Ideias de posts"], &clicks);
        chat.render_suggestions(&["Como aumentar vendas?", "Ideias de posts"], &clicks);
        assert_eq!(clicks.len(), 2);

        clicks.emit(&Click::on("Ideias de posts"));
        assert_eq!(chat.view().input, "Ideias de posts");

        chat.teardown();
        assert!(clicks.is_empty());
        assert!(chat.view().session.is_empty());
    }
}
