//! Permissive HTML fragment parsing.
//!
//! Comment markup is parsed with html5ever into an arena tree. html5ever
//! implements the browser tree-construction rules, so any input produces a
//! tree: malformed tags are repaired or ignored, never reported.

mod arena;
mod tree_sink;

pub use arena::{ArenaDom, Attribute, Children, Node, NodeData, NodeId};
pub use tree_sink::ArenaSink;

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns};

/// A parsed fragment: the tree plus the node whose children are the content.
pub struct Fragment {
    dom: ArenaDom,
    root: NodeId,
}

impl Fragment {
    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// The `<html>` root holding the parsed content.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Top-level nodes of the fragment.
    pub fn children(&self) -> Children<'_> {
        self.dom.children(self.root)
    }
}

/// Parse an HTML fragment as it would appear inside `<body>`.
///
/// Uses the fragment parsing algorithm with a `body` context, so an
/// unterminated raw-text element (`<textarea>`, `<plaintext>`) ends at the
/// end of the input.
pub fn parse_fragment(html: &str) -> Fragment {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let sink = html5ever::parse_fragment(
        ArenaSink::new(),
        ParseOpts::default(),
        context,
        Vec::new(),
        false,
    )
    .one(html);
    let dom = sink.into_dom();

    // The tree builder appends a single `html` root to the document and
    // parses the content into it.
    let root = dom.find_by_tag("html").unwrap_or_else(|| dom.document());
    Fragment { dom, root }
}
