use crate::cycle::markup::{icon, Element, Markup};
use crate::cycle::view::{Container, Node, NodeKind};

pub const MAX_MESSAGE_CHARS: usize = 280;

pub fn present(container: &mut Container, message: &str) {
    let markup = Element::new("div")
        .class("error-message")
        .attr("role", "alert")
        .text(&truncate(message))
        .build();
    replace(container, markup);
}

pub fn present_titled(container: &mut Container, icon_name: &str, title: &str, message: &str) {
    let markup = Element::new("div")
        .class("result-card error")
        .attr("role", "alert")
        .child(
            Element::new("div")
                .class("result-title")
                .child(icon(icon_name))
                .text(&format!(" {title}")),
        )
        .child(
            Element::new("div")
                .class("result-content")
                .text(&truncate(message)),
        )
        .build();
    replace(container, markup);
}

fn replace(container: &mut Container, markup: Markup) {
    container.clear();
    container.append(Node::new(NodeKind::Error, markup));
}

pub fn truncate(message: &str) -> String {
    let message = message.trim();
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}…", &message[..cut]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_escaped() {
        let mut container = Container::new();
        present(&mut container, "<img src=x onerror=alert(1)>");

        let html = container.html();
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn present_replaces_instead_of_appending() {
        let mut container = Container::new();
        container.append(Node::new(NodeKind::Result, Markup::text("stale")));
        present(&mut container, "first");
        present_titled(&mut container, "exclamation-triangle", "Erro", "second");

        assert_eq!(container.len(), 1);
        assert_eq!(container.count(NodeKind::Error), 1);
        assert!(container.html().contains("second"));
        assert!(!container.html().contains("stale"));
    }

    #[test]
    fn long_messages_are_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_MESSAGE_CHARS + 10);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_MESSAGE_CHARS + 1);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate("  curta  "), "curta");
    }
}
