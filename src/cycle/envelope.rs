use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const CONNECTION_ERROR: &str = "connection";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestEnvelope {
    fields: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn builder() -> RequestEnvelopeBuilder {
        RequestEnvelopeBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.fields)
    }
}

#[derive(Debug, Default)]
pub struct RequestEnvelopeBuilder {
    fields: Map<String, Value>,
}

impl RequestEnvelopeBuilder {
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn serialized(mut self, name: &str, value: &impl serde::Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> RequestEnvelope {
        RequestEnvelope {
            fields: self.fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Application,
    Validation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn connection() -> Self {
        Self {
            kind: FailureKind::Transport,
            message: CONNECTION_ERROR.to_string(),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Application,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
        }
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.message.trim();
        if trimmed.is_empty() { fallback } else { trimmed }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str_field(&self, name: &str) -> &str {
        self.0.get(name).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }

    /// Decodes a single field; a missing field decodes from null.
    pub fn decode_field<T: DeserializeOwned>(&self, name: &str) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.get(name).cloned().unwrap_or(Value::Null))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    Success(Payload),
    Failure(Failure),
}

impl ResponseEnvelope {
    /// Reads `{success: bool, ...}`. `None` when the body is not an object
    /// with a boolean `success`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let success = fields.remove("success")?.as_bool()?;
        if success {
            return Some(Self::Success(Payload(fields)));
        }

        let message = match fields.remove("error") {
            Some(Value::String(message)) => message,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Some(Self::Failure(Failure::application(message)))
    }

    pub fn connection_failure() -> Self {
        Self::Failure(Failure::connection())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
