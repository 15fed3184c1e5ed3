//! Tree rewrite from the parsed fragment to allow-listed markup.

use html5ever::ns;

use crate::dom::{ArenaDom, Fragment, NodeData, NodeId};
use crate::escape::push_text;

use super::style::SpanStyle;
use super::{AllowList, Policy};

/// Elements removed with everything inside them. Their content is never
/// displayed as text.
const DROPPED: &[&str] = &[
    "script", "style", "template", "noscript", "iframe", "noembed", "noframes", "head",
];

/// Elements that mark a line boundary when folded.
const BLOCKS: &[&str] = &[
    "div", "p", "li", "ul", "ol", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// What to do with one element.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Drop,
    LineBreak,
    /// Re-emit as the given bare tag.
    Keep(&'static str),
    /// Unwrap and follow with `<br>`.
    Fold,
    /// `span`: reduce the inline style.
    Span,
    /// `details`: keep the spoiler class only.
    Details,
    Unwrap,
}

fn classify(tag: &str, html: bool, policy: &Policy) -> Action {
    if DROPPED.contains(&tag) {
        return Action::Drop;
    }
    // SVG and MathML elements share local names with HTML ones.
    if !html {
        return Action::Unwrap;
    }
    if matches!(tag, "strike" | "del") {
        return Action::Keep("s");
    }
    if policy.fold_blocks && BLOCKS.contains(&tag) {
        return Action::Fold;
    }
    if tag == "span" {
        return Action::Span;
    }
    if !policy.allow_list.allows(tag) {
        return Action::Unwrap;
    }
    match tag {
        "br" => Action::LineBreak,
        "details" => Action::Details,
        _ => match policy.allow_list.tags().iter().find(|t| **t == tag) {
            Some(known) => Action::Keep(*known),
            None => Action::Unwrap,
        },
    }
}

/// Pending work on the explicit stack.
enum Step {
    Visit(NodeId),
    Close(&'static str),
}

struct Writer<'a> {
    dom: &'a ArenaDom,
    policy: &'a Policy,
    out: String,
    stack: Vec<Step>,
}

impl Writer<'_> {
    fn push_children(&mut self, id: NodeId) {
        let mark = self.stack.len();
        self.stack.extend(self.dom.children(id).map(Step::Visit));
        self.stack[mark..].reverse();
    }

    fn open(&mut self, tag: &str) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn open_closing(&mut self, tag: &'static str, close: &'static str) {
        self.open(tag);
        self.stack.push(Step::Close(close));
    }

    fn run(&mut self) {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Close(markup) => self.out.push_str(markup),
                Step::Visit(id) => self.visit(id),
            }
        }
    }

    fn visit(&mut self, id: NodeId) {
        let dom = self.dom;
        let Some(node) = dom.get(id) else {
            return;
        };

        match &node.data {
            NodeData::Text(text) => push_text(&mut self.out, text),
            NodeData::Element { name, .. } => {
                let action = classify(name.local.as_ref(), name.ns == ns!(html), self.policy);
                self.visit_element(id, action);
            }
            NodeData::Document | NodeData::Ignored => {}
        }
    }

    fn visit_element(&mut self, id: NodeId, action: Action) {
        match action {
            Action::Drop => {
                tracing::trace!(node = ?id, "dropped element with content");
            }
            Action::LineBreak => self.out.push_str("<br>"),
            Action::Keep(tag) => {
                self.open_closing(tag, closing_tag(tag));
                self.push_children(id);
            }
            Action::Fold => {
                self.stack.push(Step::Close("<br>"));
                self.push_children(id);
            }
            Action::Span => {
                let style = self
                    .dom
                    .get_attr(id, "style")
                    .map(SpanStyle::parse)
                    .unwrap_or_default();
                self.write_span(&style);
                self.push_children(id);
            }
            Action::Details => {
                if self.dom.has_class(id, "spoiler") {
                    self.out.push_str(r#"<details class="spoiler">"#);
                } else {
                    self.out.push_str("<details>");
                }
                self.stack.push(Step::Close("</details>"));
                self.push_children(id);
            }
            Action::Unwrap => self.push_children(id),
        }
    }

    /// Open the markup for a styled span. Closers go on the stack, so the
    /// children must be pushed after this call.
    fn write_span(&mut self, style: &SpanStyle) {
        if style.is_empty() {
            return;
        }
        match self.policy.allow_list {
            AllowList::Extended => {
                self.out.push_str(r#"<span style=""#);
                self.out.push_str(&style.to_css());
                self.out.push_str(r#"">"#);
                self.stack.push(Step::Close("</span>"));
            }
            AllowList::Base => {
                // Closers are stacked outermost first so the innermost pops first.
                for tag in style.semantic_tags() {
                    self.open_closing(tag, closing_tag(tag));
                }
            }
        }
    }
}

fn closing_tag(tag: &str) -> &'static str {
    match tag {
        "b" => "</b>",
        "i" => "</i>",
        "u" => "</u>",
        "s" => "</s>",
        "strong" => "</strong>",
        "em" => "</em>",
        "summary" => "</summary>",
        "div" => "</div>",
        "span" => "</span>",
        "details" => "</details>",
        _ => "",
    }
}

/// Serialize the fragment through the allow-list, before post-processing.
pub(super) fn write_fragment(fragment: &Fragment, policy: &Policy) -> String {
    let mut writer = Writer {
        dom: fragment.dom(),
        policy,
        out: String::new(),
        stack: Vec::new(),
    };
    writer.push_children(fragment.root());
    writer.run();
    writer.out
}
