use crate::config::ClientConfig;
use crate::cycle::markup::{Element, Markup};
use crate::cycle::view::{Node, NodeKind};
use crate::cycle::{
    reconcile, BusyStateView, Container, ControlId, Failure, FailureKind, JsonFetcher, Method,
    RequestGate, ResponseEnvelope, Settled, Transport,
};
use crate::format;
use crate::models::{DashboardData, Insight, Sale};
use parking_lot::{Mutex, MutexGuard};
use tracing::{error, info, warn};

const LOAD_CONTROL: ControlId = ControlId::fixed("dashboard");

pub const INVALID_DATA: &str = "Dados do dashboard em formato inesperado.";
const UNKNOWN_ERROR: &str = "Erro desconhecido";
const CONNECTION_MESSAGE: &str = "Erro de conexão. Tente novamente.";
pub const NO_FILE_HINT: &str = "Selecione um arquivo CSV/XLS/XLSX.";
pub const UPLOAD_ACCEPTED: &str = "Upload enviado. Integração com backend será ligada.";

const CHANNEL_COLORS: [&str; 6] = [
    "#60a5fa", "#f59e0b", "#22c55e", "#a78bfa", "#f97316", "#10b981",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub canvas: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiTiles {
    pub faturamento: String,
    pub novos_clientes: String,
    pub cac: String,
}

#[derive(Debug, Default)]
pub struct DashboardView {
    pub kpis: KpiTiles,
    pub charts: Vec<ChartSpec>,
    pub sales: BusyStateView,
    pub insights: Container,
    pub toasts: Container,
    pub upload_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Toast {
    Success,
    Error,
}

impl DashboardView {
    fn notify(&mut self, kind: Toast, message: &str) {
        let class = match kind {
            Toast::Success => "dash-toast success",
            Toast::Error => "dash-toast error",
        };
        let markup = Element::new("div").class(class).text(message).build();
        self.toasts.append(Node::new(NodeKind::Notice, markup));
    }
}

fn charts(data: &DashboardData) -> Vec<ChartSpec> {
    vec![
        ChartSpec {
            canvas: "cashflowChart",
            kind: ChartKind::Line,
            labels: data.cashflow.labels.clone(),
            datasets: vec![
                Dataset {
                    label: "Entradas".to_string(),
                    values: data.cashflow.entradas.clone(),
                    colors: vec!["#22c55e"],
                },
                Dataset {
                    label: "Saídas".to_string(),
                    values: data.cashflow.saidas.clone(),
                    colors: vec!["#ef4444"],
                },
            ],
        },
        ChartSpec {
            canvas: "channelChart",
            kind: ChartKind::Doughnut,
            labels: data.channels.labels.clone(),
            datasets: vec![Dataset {
                label: String::new(),
                values: data.channels.values.clone(),
                colors: CHANNEL_COLORS.to_vec(),
            }],
        },
    ]
}

fn sale_row(sale: &Sale) -> Markup {
    let status_class = if sale.status == "Pago" { "ok" } else { "pending" };
    let cells = [
        sale.id.map(|id| id.to_string()).unwrap_or_default(),
        format::short_date(&sale.data),
        sale.cliente.clone(),
        sale.canal.clone(),
        format::brl(sale.valor.unwrap_or(0.0)),
    ];

    let mut row = Element::new("tr");
    for cell in &cells {
        row = row.child(Element::new("td").text(cell));
    }
    row.child(
        Element::new("td").child(
            Element::new("span")
                .class(format!("status {status_class}"))
                .text(&sale.status),
        ),
    )
    .build()
}

fn insight_icon(name: &str) -> &'static str {
    match name {
        "graph-up" => "bi-graph-up",
        "cash" => "bi-cash-coin",
        _ => "bi-lightbulb",
    }
}

fn insight_card(insight: &Insight) -> Markup {
    Element::new("div")
        .class("insight")
        .child(Element::new("i").class(format!("bi {}", insight_icon(&insight.icon))))
        .child(
            Element::new("div")
                .child(Element::new("strong").text(&insight.title))
                .child(Element::new("p").text(&insight.text)),
        )
        .build()
}

pub struct DashboardPage<T> {
    url: String,
    csrf_token: String,
    fetcher: JsonFetcher<T>,
    gate: RequestGate,
    view: Mutex<DashboardView>,
}

impl<T: Transport> DashboardPage<T> {
    pub fn new(transport: T, url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            csrf_token: csrf_token.into(),
            fetcher: JsonFetcher::new(transport),
            gate: RequestGate::new(),
            view: Mutex::new(DashboardView::default()),
        }
    }

    pub fn from_config(transport: T, config: &ClientConfig) -> Self {
        Self::new(transport, config.dashboard_url(), config.csrf_token.clone())
    }

    pub fn view(&self) -> MutexGuard<'_, DashboardView> {
        self.view.lock()
    }

    pub async fn load(&self) -> Settled {
        let Some(_pass) = self.gate.enter(&LOAD_CONTROL) else {
            return Settled::Busy;
        };
        self.view.lock().sales.begin();

        let envelope = self
            .fetcher
            .send(&self.url, Method::Get, None, &self.csrf_token)
            .await;

        let mut view = self.view.lock();
        let settled = match envelope {
            ResponseEnvelope::Success(payload) => match payload.decode_field::<DashboardData>("data") {
                Ok(data) => {
                    view.kpis = KpiTiles {
                        faturamento: format::brl(data.kpis.faturamento_mes.unwrap_or(0.0)),
                        novos_clientes: data.kpis.novos_clientes.unwrap_or(0).to_string(),
                        cac: format::brl(data.kpis.cac.unwrap_or(0.0)),
                    };
                    view.charts = charts(&data);
                    view.sales.populate(&data.latest_sales, sale_row);
                    reconcile::render(&mut view.insights, &data.insights, insight_card);
                    info!(
                        sales = data.latest_sales.len(),
                        insights = data.insights.len(),
                        "dashboard loaded"
                    );
                    Settled::Populated
                }
                Err(err) => {
                    error!("dashboard payload rejected: {err}");
                    view.sales.fail(INVALID_DATA);
                    Settled::Failed(Failure::application(INVALID_DATA))
                }
            },
            ResponseEnvelope::Failure(failure) => {
                error!(kind = ?failure.kind, "dashboard load error: {}", failure.message);
                let text = match failure.kind {
                    FailureKind::Transport => CONNECTION_MESSAGE,
                    _ => failure.message_or(UNKNOWN_ERROR),
                };
                view.sales.fail(text);
                Settled::Failed(failure)
            }
        };
        view.sales.settle();
        settled
    }

    pub fn open_upload(&self) {
        self.view.lock().upload_open = true;
    }

    /// Checks the chosen file before anything is sent. Upload itself has no
    /// backend yet, so an accepted file only closes the modal.
    pub fn submit_upload(&self, file: Option<&str>) -> Settled {
        let mut view = self.view.lock();
        let Some(name) = file.map(str::trim).filter(|name| !name.is_empty()) else {
            warn!("upload submitted without a file");
            view.notify(Toast::Error, NO_FILE_HINT);
            return Settled::Invalid(NO_FILE_HINT.to_string());
        };
        info!(file = name, "upload accepted");
        view.notify(Toast::Success, UPLOAD_ACCEPTED);
        view.upload_open = false;
        Settled::Populated
    }
}
