//! Nested `<ul>`/`<li>` rendering of a menu hierarchy
//!
//! Markup per node is `child_open(node) + node_decorator(node)
//! [+ nested list of children] + child_close`, wrapped per level in
//! `root_open` / `root_close`.

use crate::domain::HierarchyNode;

type NodeMarkup<'a> = Box<dyn Fn(&HierarchyNode) -> String + 'a>;

/// Markup pieces and per-node callbacks used by [`render_html`].
pub struct HtmlTreeOptions<'a> {
    pub root_open: String,
    pub root_close: String,
    pub child_close: String,
    pub child_open: NodeMarkup<'a>,
    pub node_decorator: NodeMarkup<'a>,
}

impl Default for HtmlTreeOptions<'_> {
    fn default() -> Self {
        Self {
            root_open: "<ul>".to_string(),
            root_close: "</ul>".to_string(),
            child_close: "</li>".to_string(),
            child_open: Box::new(|_| "<li>".to_string()),
            node_decorator: Box::new(|node| escape_html(&node.title)),
        }
    }
}

impl<'a> HtmlTreeOptions<'a> {
    pub fn child_open(mut self, f: impl Fn(&HierarchyNode) -> String + 'a) -> Self {
        self.child_open = Box::new(f);
        self
    }

    pub fn node_decorator(mut self, f: impl Fn(&HierarchyNode) -> String + 'a) -> Self {
        self.node_decorator = Box::new(f);
        self
    }

    /// Markup of the admin tree view: open `jstree` items with DOM ids
    /// `<prefix><id>` and a link showing title and id.
    pub fn admin_tree(dom_node_prefix: &'a str) -> Self {
        Self::default()
            .child_open(move |node| {
                format!(
                    "<li class=\"jstree-open\" id=\"{}{}\">",
                    escape_html(dom_node_prefix),
                    node.id
                )
            })
            .node_decorator(|node| {
                format!("<a href=\"#\">{} ({})</a>", escape_html(&node.title), node.id)
            })
    }
}

/// Render a hierarchy as nested lists.
pub fn render_html(nodes: &[HierarchyNode], options: &HtmlTreeOptions<'_>) -> String {
    let mut out = String::new();
    render_level(nodes, options, &mut out);
    out
}

fn render_level(nodes: &[HierarchyNode], options: &HtmlTreeOptions<'_>, out: &mut String) {
    out.push_str(&options.root_open);
    for node in nodes {
        out.push_str(&(options.child_open)(node));
        out.push_str(&(options.node_decorator)(node));
        if !node.children.is_empty() {
            render_level(&node.children, options, out);
        }
        out.push_str(&options.child_close);
    }
    out.push_str(&options.root_close);
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
