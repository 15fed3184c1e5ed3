//! Arena-allocated node tree for parsed comment markup.
//!
//! Nodes live in one vector and refer to each other by index. The tree is
//! built once by the html5ever sink and then only walked, so there is no
//! free list and detached nodes simply stay in the arena.

use html5ever::{LocalName, QualName};

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// HTML attribute, kept only until the filter has looked at it.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// `class` attribute split on whitespace.
        classes: Vec<String>,
    },
    Text(String),
    /// Comments, doctypes and processing instructions. Never rendered.
    Ignored,
}

/// A node and its tree links.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }
}

/// Parsed document tree.
pub struct ArenaDom {
    nodes: Vec<Node>,
}

impl ArenaDom {
    /// Create a tree holding only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// The document root. Always the first node.
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let classes = attrs
            .iter()
            .find(|a| a.name.local.as_ref() == "class")
            .map(|a| a.value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        self.alloc(NodeData::Element {
            name,
            attrs,
            classes,
        })
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(NodeData::Text(text))
    }

    pub fn create_ignored(&mut self) -> NodeId {
        self.alloc(NodeData::Ignored)
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last = self.get(parent).and_then(|n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }
        if let Some(last) = last
            && let Some(node) = self.get_mut(last)
        {
            node.next_sibling = Some(child);
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = Some(child);
            }
            node.last_child = Some(child);
        }
    }

    /// Append text to `parent`, merging into a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.get(parent).and_then(|n| n.last_child);
        if let Some(last) = last
            && let Some(Node {
                data: NodeData::Text(existing),
                ..
            }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = Some(sibling);
        }
        if let Some(node) = self.get_mut(sibling) {
            node.prev_sibling = Some(new_node);
        }
        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = Some(new_node);
                }
            }
            None => {
                if let Some(parent) = parent
                    && let Some(node) = self.get_mut(parent)
                {
                    node.first_child = Some(new_node);
                }
            }
        }
    }

    /// Unlink a node from its parent and siblings. Its own children stay attached.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next_sibling = next;
                }
            }
            None => {
                if let Some(parent) = parent
                    && let Some(node) = self.get_mut(parent)
                {
                    node.first_child = next;
                }
            }
        }
        match next {
            Some(next) => {
                if let Some(node) = self.get_mut(next) {
                    node.prev_sibling = prev;
                }
            }
            None => {
                if let Some(parent) = parent
                    && let Some(node) = self.get_mut(parent)
                {
                    node.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = None;
            node.prev_sibling = None;
            node.next_sibling = None;
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        let children: Vec<_> = self.children(from).collect();
        for child in children {
            self.detach(child);
            self.append(to, child);
        }
    }

    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            dom: self,
            next: self.get(parent).and_then(|n| n.first_child),
        }
    }

    /// First element with the given local name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        let mut stack = vec![self.document()];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|name| name.as_ref() == tag) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }

    /// Local name of an element node.
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        match &self.get(id)?.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        }
    }

    pub fn get_attr(&self, id: NodeId, attr: &str) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { classes, .. }) => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.data {
            NodeData::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    dom: &'a ArenaDom,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.dom.get(id).and_then(|n| n.next_sibling);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::ns;

    fn qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    #[test]
    fn test_append_and_iterate() {
        let mut dom = ArenaDom::new();
        let b = dom.create_element(qname("b"), vec![]);
        let i = dom.create_element(qname("i"), vec![]);
        dom.append(dom.document(), b);
        dom.append(dom.document(), i);

        let children: Vec<_> = dom.children(dom.document()).collect();
        assert_eq!(children, vec![b, i]);
    }

    #[test]
    fn test_text_merging() {
        let mut dom = ArenaDom::new();
        let b = dom.create_element(qname("b"), vec![]);
        dom.append(dom.document(), b);

        dom.append_text(b, "spoilers ");
        dom.append_text(b, "ahead");

        let children: Vec<_> = dom.children(b).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("spoilers ahead"));
    }

    #[test]
    fn test_detach_middle_child() {
        let mut dom = ArenaDom::new();
        let root = dom.document();
        let a = dom.create_text("a".into());
        let b = dom.create_text("b".into());
        let c = dom.create_text("c".into());
        dom.append(root, a);
        dom.append(root, b);
        dom.append(root, c);

        dom.detach(b);

        let children: Vec<_> = dom.children(root).collect();
        assert_eq!(children, vec![a, c]);
        assert!(dom.get(b).unwrap().parent.is_none());
    }

    #[test]
    fn test_insert_before_first() {
        let mut dom = ArenaDom::new();
        let root = dom.document();
        let second = dom.create_text("second".into());
        dom.append(root, second);
        let first = dom.create_text("first".into());
        dom.insert_before(second, first);

        let children: Vec<_> = dom.children(root).collect();
        assert_eq!(children, vec![first, second]);
    }

    #[test]
    fn test_reparent_children() {
        let mut dom = ArenaDom::new();
        let root = dom.document();
        let from = dom.create_element(qname("div"), vec![]);
        let to = dom.create_element(qname("p"), vec![]);
        dom.append(root, from);
        dom.append(root, to);
        dom.append_text(from, "x");

        dom.reparent_children(from, to);

        assert_eq!(dom.children(from).count(), 0);
        let moved: Vec<_> = dom.children(to).collect();
        assert_eq!(dom.text_content(moved[0]), Some("x"));
    }

    #[test]
    fn test_classes_extracted() {
        let mut dom = ArenaDom::new();
        let details = dom.create_element(
            qname("details"),
            vec![Attribute {
                name: qname("class"),
                value: "spoiler  wide".into(),
            }],
        );
        assert!(dom.has_class(details, "spoiler"));
        assert!(dom.has_class(details, "wide"));
        assert!(!dom.has_class(details, "spoil"));
    }
}
