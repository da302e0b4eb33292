use crate::config::ClientConfig;
use crate::cycle::markup::{icon, Element, Markup};
use crate::cycle::{
    reconcile, BusyStateView, Click, Container, ControlId, FailureKind, JsonFetcher, Listeners,
    Method, RequestEnvelope, RequestGate, ResponseEnvelope, Settled, SubmitControl, Transport,
};
use crate::format;
use crate::models::{ContentIdeasForm, ContentIdeasReply, DashboardData, Insight};
use chrono::{Local, NaiveDateTime};
use parking_lot::{Mutex, MutexGuard};
use std::sync::{Arc, Weak};
use tracing::{info, warn};

const GENERATE_CONTROL: ControlId = ControlId::fixed("generateBtn");
const INSIGHTS_CONTROL: ControlId = ControlId::fixed("ciInsights");

pub const REQUIRED_FIELDS_HINT: &str = "Preencha todos os campos obrigatórios.";
const GENERATE_FALLBACK: &str = "Erro ao gerar ideias";
const CONNECTION_MESSAGE: &str = "Erro de conexão. Tente novamente.";
pub const NO_INSIGHTS: &str = "Sem insights no momento.";
pub const INSIGHTS_FAILED: &str = "Falha ao carregar insights.";

pub fn label_content_type(value: &str) -> &str {
    match value {
        "social_media" => "Posts para Redes Sociais",
        "blog_posts" => "Artigos para Blog",
        "email_campaigns" => "Campanhas de Email",
        "ad_copy" => "Textos para Anúncios",
        "video_scripts" => "Roteiros para Vídeos",
        "product_descriptions" => "Descrições de Produtos",
        other => other,
    }
}

pub fn label_platform(value: &str) -> &str {
    match value {
        "instagram" => "Instagram",
        "facebook" => "Facebook",
        "linkedin" => "LinkedIn",
        "twitter" => "Twitter/X",
        "tiktok" => "TikTok",
        "youtube" => "YouTube",
        "website" => "Website",
        "email" => "Email",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickTemplate {
    pub name: String,
    pub content_type: String,
    pub platform: String,
    pub tone: String,
}

enum Card<'a> {
    Idea { number: usize, text: &'a str },
    Details {
        content_type: &'a str,
        platform: &'a str,
        generated_at: NaiveDateTime,
    },
}

impl Card<'_> {
    fn render(self) -> Markup {
        let (icon_name, title, content) = match self {
            Card::Idea { number, text } => (
                "lightbulb",
                format!(" Ideia {number}"),
                Element::new("p").text(text).build(),
            ),
            Card::Details {
                content_type,
                platform,
                generated_at,
            } => {
                let mut rows = Vec::new();
                if !content_type.is_empty() {
                    rows.push(labelled("Tipo:", label_content_type(content_type)));
                }
                if !platform.is_empty() {
                    rows.push(labelled("Plataforma:", label_platform(platform)));
                }
                rows.push(labelled("Gerado em:", &format::timestamp(generated_at)));
                ("info-circle", " Detalhes".to_string(), Markup::concat(rows))
            }
        };

        Element::new("div")
            .class("result-card")
            .child(
                Element::new("div")
                    .class("result-title")
                    .child(icon(icon_name))
                    .text(&title),
            )
            .child(Element::new("div").class("result-content").child(content))
            .build()
    }
}

fn labelled(label: &str, value: &str) -> Markup {
    Element::new("p")
        .child(Element::new("strong").text(label))
        .text(&format!(" {value}"))
        .build()
}

fn cards(reply: &ContentIdeasReply, generated_at: NaiveDateTime) -> Vec<Card<'_>> {
    let mut cards: Vec<Card<'_>> = reply
        .ideas
        .iter()
        .enumerate()
        .map(|(idx, text)| Card::Idea {
            number: idx + 1,
            text,
        })
        .collect();
    if !reply.content_type.is_empty() || !reply.platform.is_empty() {
        cards.push(Card::Details {
            content_type: &reply.content_type,
            platform: &reply.platform,
            generated_at,
        });
    }
    cards
}

fn insight_item(insight: &Insight) -> Markup {
    let icon_name = if insight.icon.trim().is_empty() {
        "lightbulb"
    } else {
        insight.icon.trim()
    };
    let title = if insight.title.trim().is_empty() {
        "Insight"
    } else {
        insight.title.as_str()
    };
    Element::new("div")
        .class("insight-item")
        .child(icon(icon_name))
        .child(
            Element::new("div")
                .child(Element::new("strong").text(title))
                .child(Element::new("div").class("text").text(&insight.text)),
        )
        .build()
}

#[derive(Debug)]
pub struct ContentIdeasView {
    pub form: ContentIdeasForm,
    pub generate: SubmitControl,
    pub results: BusyStateView,
    pub insights: BusyStateView,
    pub templates: Container,
}

impl ContentIdeasView {
    fn new() -> Self {
        Self {
            form: ContentIdeasForm::default(),
            generate: SubmitControl::new("Gerar Ideias", "Gerando..."),
            results: BusyStateView::new(),
            insights: BusyStateView::new(),
            templates: Container::new(),
        }
    }
}

pub struct ContentIdeasPage<T> {
    api_url: String,
    dashboard_url: String,
    csrf_token: String,
    fetcher: JsonFetcher<T>,
    gate: RequestGate,
    view: Arc<Mutex<ContentIdeasView>>,
}

impl<T: Transport> ContentIdeasPage<T> {
    pub fn new(
        transport: T,
        api_url: impl Into<String>,
        dashboard_url: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            dashboard_url: dashboard_url.into(),
            csrf_token: csrf_token.into(),
            fetcher: JsonFetcher::new(transport),
            gate: RequestGate::new(),
            view: Arc::new(Mutex::new(ContentIdeasView::new())),
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(
            transport,
            config.content_ideas_url(),
            config.dashboard_url(),
            config.csrf_token.clone(),
        )
    }

    pub fn view(&self) -> MutexGuard<'_, ContentIdeasView> {
        self.view.lock()
    }

    pub fn fill(&self, form: ContentIdeasForm) {
        self.view.lock().form = form;
    }

    pub async fn submit(&self) -> Settled {
        let form = self.view.lock().form.clone();
        let missing = form.missing_fields();
        if !missing.is_empty() {
            info!(?missing, "content ideas form incomplete");
            self.view.lock().generate.set_hint(REQUIRED_FIELDS_HINT);
            return Settled::Invalid(REQUIRED_FIELDS_HINT.to_string());
        }

        let Some(_pass) = self.gate.enter(&GENERATE_CONTROL) else {
            return Settled::Busy;
        };

        {
            let mut view = self.view.lock();
            view.generate.lock();
            view.results.begin();
        }

        let body = RequestEnvelope::builder()
            .field("business_description", form.business_description.as_str())
            .field("content_type", form.content_type.as_str())
            .field("platform", form.platform.as_str())
            .field("target_audience", form.target_audience.as_str())
            .field("tone", form.tone.as_str())
            .field("keywords", form.keywords.as_str())
            .field("quantity", form.quantity.as_str())
            .build();
        let envelope = self
            .fetcher
            .send(&self.api_url, Method::Post, Some(&body), &self.csrf_token)
            .await;

        let mut view = self.view.lock();
        let settled = match envelope {
            ResponseEnvelope::Success(payload) => {
                let reply: ContentIdeasReply = payload.decode().unwrap_or_else(|err| {
                    warn!("unexpected content ideas payload: {err}");
                    ContentIdeasReply::default()
                });
                let now = Local::now().naive_local();
                view.results.populate(cards(&reply, now), Card::render);
                info!(ideas = reply.ideas.len(), "content ideas rendered");
                Settled::Populated
            }
            ResponseEnvelope::Failure(failure) => {
                match failure.kind {
                    FailureKind::Transport => view
                        .results
                        .fail_titled(Some(("wifi-off", "Conexão")), CONNECTION_MESSAGE),
                    _ => view.results.fail_titled(
                        Some(("exclamation-triangle", "Erro")),
                        failure.message_or(GENERATE_FALLBACK),
                    ),
                };
                Settled::Failed(failure)
            }
        };

        view.results.settle();
        view.generate.unlock();
        settled
    }

    pub async fn load_insights(&self) -> Settled {
        let Some(_pass) = self.gate.enter(&INSIGHTS_CONTROL) else {
            return Settled::Busy;
        };
        self.view.lock().insights.begin();

        let envelope = self
            .fetcher
            .send(&self.dashboard_url, Method::Get, None, &self.csrf_token)
            .await;

        let mut view = self.view.lock();
        let settled = match envelope {
            ResponseEnvelope::Success(payload) => {
                let data: DashboardData = payload.decode_field("data").unwrap_or_default();
                if data.insights.is_empty() {
                    view.insights.populate([NO_INSIGHTS], |text| {
                        Element::new("div").class("insight-item muted").text(text).build()
                    });
                } else {
                    view.insights.populate(&data.insights, insight_item);
                }
                Settled::Populated
            }
            ResponseEnvelope::Failure(failure) => {
                warn!(error = %failure.message, "insights unavailable");
                view.insights.fail(INSIGHTS_FAILED);
                Settled::Failed(failure)
            }
        };
        view.insights.settle();
        settled
    }

    pub fn render_templates(&self, templates: &[QuickTemplate], clicks: &Listeners<Click>) {
        let weak: Weak<Mutex<ContentIdeasView>> = Arc::downgrade(&self.view);
        let mut view = self.view.lock();
        reconcile::render_bound(&mut view.templates, templates, |template| {
            let preset = template.clone();
            let view = Weak::clone(&weak);
            let subscription = clicks.subscribe(move |click| {
                if click.target != preset.name {
                    return;
                }
                if let Some(view) = view.upgrade() {
                    let mut view = view.lock();
                    view.form.content_type = preset.content_type.clone();
                    view.form.platform = preset.platform.clone();
                    view.form.tone = preset.tone.clone();
                }
            });
            let button = Element::new("button")
                .class("qt-btn")
                .attr("data-type", &template.content_type)
                .attr("data-platform", &template.platform)
                .attr("data-tone", &template.tone)
                .text(&template.name)
                .build();
            (button, vec![subscription])
        });
    }

    pub fn teardown(&self) {
        *self.view.lock() = ContentIdeasView::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::fetch::testing::{Scripted, ScriptedTransport};
    use crate::cycle::view::NodeKind;
    use crate::cycle::BusyState;
    use serde_json::json;

    fn page(transport: &ScriptedTransport) -> ContentIdeasPage<ScriptedTransport> {
        ContentIdeasPage::new(
            transport.clone(),
            "/api/content-ideas/",
            "/api/dashboard-data/",
            "csrf-123",
        )
    }

    fn complete_form() -> ContentIdeasForm {
        ContentIdeasForm {
            business_description: "Padaria artesanal. Pães de fermentação natural".into(),
            content_type: "social_media".into(),
            platform: "instagram".into(),
            target_audience: "Moradores do bairro".into(),
            tone: "casual".into(),
            keywords: "pão, café".into(),
            quantity: "3".into(),
        }
    }

    #[tokio::test]
    async fn three_ideas_render_three_cards() {
        let transport = ScriptedTransport::json(json!({"success": true, "ideas": ["a", "b", "c"]}));
        let ideas = page(&transport);
        assert!(ideas.view().results.container().is_empty());

        ideas.fill(complete_form());
        assert_eq!(ideas.submit().await, Settled::Populated);

        let view = ideas.view();
        let results = view.results.container();
        assert_eq!(results.count(NodeKind::Result), 3);
        assert!(results.html().contains("Ideia 3"));
        assert!(!view.results.is_placeholder_visible());

        let body = transport.body_of(0);
        assert_eq!(body["quantity"], "3");
        assert_eq!(body["platform"], "instagram");
    }

    #[tokio::test]
    async fn details_card_uses_labels() {
        let transport = ScriptedTransport::json(json!({
            "success": true,
            "ideas": ["a"],
            "content_type": "blog_posts",
            "platform": "twitter"
        }));
        let ideas = page(&transport);
        ideas.fill(complete_form());
        ideas.submit().await;

        let view = ideas.view();
        let html = view.results.container().html();
        assert_eq!(view.results.container().len(), 2);
        assert!(html.contains("Artigos para Blog"));
        assert!(html.contains("Twitter/X"));
        assert!(html.contains("Gerado em:"));
    }

    #[tokio::test]
    async fn server_strings_are_escaped_in_cards() {
        let transport =
            ScriptedTransport::json(json!({"success": true, "ideas": ["<script>x()</script>"]}));
        let ideas = page(&transport);
        ideas.fill(complete_form());
        ideas.submit().await;

        let html = ideas.view().results.container().html();
        assert!(html.contains("&lt;script&gt;x()&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[tokio::test]
    async fn application_failure_shows_message_and_restores_button() {
        let transport =
            ScriptedTransport::json(json!({"success": false, "error": "quota exceeded"}));
        let ideas = page(&transport);
        ideas.fill(complete_form());

        let settled = ideas.submit().await;

        assert!(matches!(settled, Settled::Failed(_)));
        let view = ideas.view();
        let results = view.results.container();
        assert_eq!(results.count(NodeKind::Error), 1);
        assert!(results.html().contains("quota exceeded"));
        assert!(!view.results.is_loading_visible());
        assert!(!view.generate.is_disabled());
        assert_eq!(view.generate.label(), "Gerar Ideias");
    }

    #[tokio::test]
    async fn failure_after_success_leaves_no_stale_cards() {
        let transport = ScriptedTransport::new([
            Scripted::Json(200, json!({"success": true, "ideas": ["a", "b"]})),
            Scripted::Unreachable,
        ]);
        let ideas = page(&transport);
        ideas.fill(complete_form());

        ideas.submit().await;
        ideas.submit().await;

        let view = ideas.view();
        let results = view.results.container();
        assert_eq!(results.len(), 1);
        assert_eq!(results.count(NodeKind::Error), 1);
        assert!(results.html().contains("Conexão"));
        assert_eq!(view.results.state(), BusyState::Idle);
        assert!(!view.generate.is_disabled());
    }

    #[tokio::test]
    async fn incomplete_form_is_not_sent() {
        let transport = ScriptedTransport::default();
        let ideas = page(&transport);
        ideas.fill(ContentIdeasForm {
            tone: String::new(),
            ..complete_form()
        });

        let settled = ideas.submit().await;

        assert_eq!(settled, Settled::Invalid(REQUIRED_FIELDS_HINT.to_string()));
        assert_eq!(transport.calls(), 0);
        assert_eq!(ideas.view().generate.hint(), Some(REQUIRED_FIELDS_HINT));
        assert_eq!(ideas.view().results.state(), BusyState::Idle);
    }

    #[tokio::test]
    async fn insights_list_and_empty_state() {
        let transport = ScriptedTransport::new([
            Scripted::Json(
                200,
                json!({"success": true, "data": {"insights": [{"title": "Fluxo", "text": "Antecipe recebíveis"}, {}]}}),
            ),
            Scripted::Json(200, json!({"success": true, "data": {}})),
        ]);
        let ideas = page(&transport);

        ideas.load_insights().await;
        {
            let view = ideas.view();
            let html = view.insights.container().html();
            assert_eq!(view.insights.container().len(), 2);
            assert!(html.contains("Antecipe recebíveis"));
            assert!(html.contains("<strong>Insight</strong>"));
            assert!(html.contains("bi-lightbulb"));
            assert!(!html.contains("undefined"));
        }

        ideas.load_insights().await;
        assert!(ideas.view().insights.container().html().contains(NO_INSIGHTS));
        assert_eq!(transport.requests()[0].method, Method::Get);
    }

    #[tokio::test]
    async fn insights_failure_shows_fallback() {
        let transport = ScriptedTransport::new([Scripted::Unreachable]);
        let ideas = page(&transport);

        ideas.load_insights().await;

        let view = ideas.view();
        assert_eq!(view.insights.container().count(NodeKind::Error), 1);
        assert!(view.insights.container().html().contains(INSIGHTS_FAILED));
    }

    #[test]
    fn template_click_fills_form() {
        let ideas = page(&ScriptedTransport::default());
        let clicks = Listeners::<Click>::new();
        let templates = vec![QuickTemplate {
            name: "Post motivacional".into(),
            content_type: "social_media".into(),
            platform: "linkedin".into(),
            tone: "inspirational".into(),
        }];

        ideas.render_templates(&templates, &clicks);
        ideas.render_templates(&templates, &clicks);
        assert_eq!(clicks.len(), 1);

        clicks.emit(&Click::on("Post motivacional"));
        let view = ideas.view();
        assert_eq!(view.form.platform, "linkedin");
        assert_eq!(view.form.tone, "inspirational");
        assert!(view.templates.html().contains("data-platform=\"linkedin\""));
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(label_content_type("podcast"), "podcast");
        assert_eq!(label_platform("youtube"), "YouTube");
    }
}
