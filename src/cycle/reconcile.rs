use crate::cycle::events::Subscription;
use crate::cycle::markup::Markup;
use crate::cycle::view::{Container, Node, NodeKind};
use serde_json::Value;

pub fn render<T, F>(container: &mut Container, items: impl IntoIterator<Item = T>, mut render_item: F)
where
    F: FnMut(T) -> Markup,
{
    container.clear();
    for item in items {
        container.append(Node::new(NodeKind::Result, render_item(item)));
    }
}

pub fn render_bound<T, F>(container: &mut Container, items: impl IntoIterator<Item = T>, mut render_item: F)
where
    F: FnMut(T) -> (Markup, Vec<Subscription>),
{
    container.clear();
    for item in items {
        let (markup, bindings) = render_item(item);
        container.append(Node::new(NodeKind::Result, markup).bound(bindings));
    }
}

pub fn field_text(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
        Some(_) => String::new(),
    }
}
