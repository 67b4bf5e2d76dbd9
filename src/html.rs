//! Html dom abstraction: a small owned node tree, serialized with
//! escaping. The page is built once per request, so nodes are plain
//! heap values; no pooling.

use kstring::KString;

const DOCTYPE: &str = "<!DOCTYPE html>\n";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    String(KString),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    /// Void elements (`<link>`, `<hr>`, ..) serialize without a
    /// closing tag and ignore their body.
    has_closing_tag: bool,
    attr: Vec<(KString, KString)>,
    body: Vec<Node>,
}

pub fn att(key: impl AsRef<str>, val: impl AsRef<str>) -> Option<(KString, KString)> {
    Some((KString::from_ref(key.as_ref()), KString::from_ref(val.as_ref())))
}

pub fn opt_att(key: impl AsRef<str>, val: Option<impl AsRef<str>>) -> Option<(KString, KString)> {
    val.and_then(|val| att(key, val))
}

pub fn text(s: impl AsRef<str>) -> Node {
    Node::String(KString::from_ref(s.as_ref()))
}

pub fn empty_node() -> Node {
    Node::None
}

fn element(
    tag: &'static str,
    has_closing_tag: bool,
    attr: impl IntoIterator<Item = Option<(KString, KString)>>,
    body: impl IntoIterator<Item = Node>,
) -> Node {
    Node::Element(Element {
        tag,
        has_closing_tag,
        attr: attr.into_iter().flatten().collect(),
        body: body.into_iter().collect(),
    })
}

macro_rules! def_element {
    ($name:ident, $tag:expr) => {
        pub fn $name(
            attr: impl IntoIterator<Item = Option<(KString, KString)>>,
            body: impl IntoIterator<Item = Node>,
        ) -> Node {
            element($tag, true, attr, body)
        }
    }
}

macro_rules! def_void_element {
    ($name:ident, $tag:expr) => {
        pub fn $name(
            attr: impl IntoIterator<Item = Option<(KString, KString)>>,
        ) -> Node {
            element($tag, false, attr, [])
        }
    }
}

def_element!(html, "html");
def_element!(head, "head");
def_element!(title, "title");
def_element!(body, "body");
def_element!(main, "main");
def_element!(div, "div");
def_element!(p, "p");
def_element!(h1, "h1");
def_element!(span, "span");
def_element!(a, "a");
def_element!(ul, "ul");
def_element!(li, "li");

def_void_element!(link, "link");
def_void_element!(meta, "meta");

fn html_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c)
        }
    }
}

impl Node {
    fn print_html_fragment(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.print_html_fragment(out),
            Node::String(s) => html_escape_into(out, s.as_str()),
            Node::None => (),
        }
    }

    pub fn to_html_fragment_string(&self) -> String {
        let mut s = String::new();
        self.print_html_fragment(&mut s);
        s
    }

    pub fn to_html_document_string(&self) -> String {
        let mut s = String::from(DOCTYPE);
        self.print_html_fragment(&mut s);
        s
    }
}

impl Element {
    fn print_html_fragment(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (key, val) in &self.attr {
            out.push(' ');
            out.push_str(key.as_str()); // key names come from code, no escape needed
            out.push_str("=\"");
            html_escape_into(out, val.as_str());
            out.push('"');
        }
        out.push('>');
        for node in &self.body {
            node.print_html_fragment(out);
        }
        if self.has_closing_tag {
            out.push_str("</");
            out.push_str(self.tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_escaping() {
        let node = p([], [text("a < b & \"c\"")]);
        assert_eq!(node.to_html_fragment_string(),
                   "<p>a &lt; b &amp; &quot;c&quot;</p>");
    }

    #[test]
    fn t_attribute_escaping() {
        let node = a([att("href", "sms:1?body=a%26b"), att("title", "say \"hi\"")],
                     [text("x")]);
        assert_eq!(node.to_html_fragment_string(),
                   "<a href=\"sms:1?body=a%26b\" title=\"say &quot;hi&quot;\">x</a>");
    }

    #[test]
    fn t_opt_att_and_empty_node() {
        let node = div([att("class", "c"), opt_att("id", None::<&str>)],
                       [empty_node(), text("y")]);
        assert_eq!(node.to_html_fragment_string(), "<div class=\"c\">y</div>");
    }

    #[test]
    fn t_void_element() {
        let node = link([att("rel", "stylesheet"), att("href", "/static/main.css")]);
        assert_eq!(node.to_html_fragment_string(),
                   "<link rel=\"stylesheet\" href=\"/static/main.css\">");
    }

    #[test]
    fn t_document() {
        let node = html([], [head([], [title([], [text("t")])]),
                             body([], [])]);
        assert_eq!(node.to_html_document_string(),
                   "<!DOCTYPE html>\n<html><head><title>t</title></head><body></body></html>");
    }
}
