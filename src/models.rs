use crate::session::ConversationTurn;
use serde::{Deserialize, Deserializer, Serialize};
use std::num::ParseIntError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<ConversationTurn>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub response: String,
    pub response_html: String,
    pub is_demo: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentIdeasForm {
    pub business_description: String,
    pub content_type: String,
    pub platform: String,
    pub target_audience: String,
    pub tone: String,
    pub keywords: String,
    #[serde(deserialize_with = "quantity_field")]
    pub quantity: String,
}

impl ContentIdeasForm {
    pub const DEFAULT_QUANTITY: usize = 5;

    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("business_description", &self.business_description),
            ("content_type", &self.content_type),
            ("platform", &self.platform),
            ("target_audience", &self.target_audience),
            ("tone", &self.tone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Blank or absent means the default; anything else must be a
    /// non-negative integer.
    pub fn quantity(&self) -> Result<usize, ParseIntError> {
        let raw = self.quantity.trim();
        if raw.is_empty() {
            return Ok(Self::DEFAULT_QUANTITY);
        }
        raw.parse()
    }
}

fn quantity_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Missing(()) => String::new(),
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentIdeasReply {
    pub ideas: Vec<String>,
    pub content_type: String,
    pub platform: String,
    pub tone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub cashflow: Cashflow,
    pub channels: Channels,
    pub latest_sales: Vec<Sale>,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Kpis {
    pub faturamento_mes: Option<f64>,
    pub novos_clientes: Option<u64>,
    pub cac: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Cashflow {
    pub labels: Vec<String>,
    pub entradas: Vec<f64>,
    pub saidas: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Channels {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Sale {
    pub id: Option<u64>,
    pub data: String,
    pub cliente: String,
    pub canal: String,
    pub valor: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Insight {
    pub icon: String,
    pub title: String,
    pub text: String,
}
