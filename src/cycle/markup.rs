use std::fmt;

/// A rendered HTML fragment.
///
/// Text enters through [`Markup::text`], which escapes it. The only way to
/// insert raw HTML is [`Markup::trusted`], reserved for fields that already
/// passed the server's sanitization boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn text(value: &str) -> Self {
        Self(escape(value))
    }

    /// Raw HTML, inserted verbatim.
    pub fn trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn push(&mut self, other: Markup) {
        self.0.push_str(&other.0);
    }

    pub fn concat(parts: impl IntoIterator<Item = Markup>) -> Self {
        let mut out = Self::empty();
        for part in parts {
            out.push(part);
        }
        out
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn paragraphs(text: &str) -> Markup {
    let normalized = text.replace("\r\n", "\n");
    Markup::concat(
        normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| {
                let lines = block.lines().map(|line| escape(line.trim_end())).collect::<Vec<_>>();
                Markup::trusted(format!("<p>{}</p>", lines.join("<br>")))
            }),
    )
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Markup,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Markup::empty(),
        }
    }

    pub fn class(self, value: impl AsRef<str>) -> Self {
        self.attr("class", value)
    }

    pub fn attr(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.attrs.push((name, value.as_ref().to_string()));
        self
    }

    pub fn text(self, value: &str) -> Self {
        self.child(Markup::text(value))
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn build(self) -> Markup {
        let mut html = format!("<{}", self.tag);
        for (name, value) in &self.attrs {
            html.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        html.push('>');
        html.push_str(self.children.as_str());
        html.push_str(&format!("</{}>", self.tag));
        Markup(html)
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        element.build()
    }
}

pub fn icon(name: &str) -> Markup {
    Element::new("i").class(format!("bi bi-{name}")).build()
}
