//! In-memory host document.
//!
//! A small arena-backed element tree with the operations the pipeline needs:
//! lookup, insertion after a node, append, and subtree removal. Removed slots
//! are recycled; each slot carries a generation so a stale id resolves to
//! nothing instead of to the slot's new occupant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::matcher::ElementMatcher;

/// Handle to an element in a [`Document`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A single element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (lowercase).
    pub tag_name: String,

    pub attributes: BTreeMap<String, String>,

    /// Direct text only, not from children.
    pub text: String,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Declarative element description, used to build subtrees.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag_name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Element tree rooted at `<html>` with a `<body>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    nodes: Vec<Slot>,
    /// Indices of emptied slots, reused before the arena grows.
    free: Vec<usize>,
    root: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId::default(),
            body: NodeId::default(),
        };
        doc.root = doc.create_element("html");
        doc.body = doc.create_element("body");
        doc.append_child(doc.root, doc.body);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Number of slots in the arena, occupied or free.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let element = Some(Element::new(tag_name));
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(index) {
                slot.element = element;
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        self.nodes.push(Slot {
            generation: 0,
            element,
        });
        NodeId {
            index: self.nodes.len() - 1,
            generation: 0,
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(el) = self.element_mut(id) {
            el.text = text.to_string();
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || self.element(parent).is_none() || self.element(child).is_none() {
            return false;
        }
        if self.is_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        if let Some(el) = self.element_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(p) = self.element_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Insert `node` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> bool {
        let Some(parent) = self.element(reference).and_then(Element::parent) else {
            return false;
        };
        if reference == node || self.element(node).is_none() || self.is_ancestor(node, reference) {
            return false;
        }
        self.detach(node);
        let Some(p) = self.element_mut(parent) else {
            return false;
        };
        let position = p
            .children
            .iter()
            .position(|c| *c == reference)
            .map_or(p.children.len(), |i| i + 1);
        p.children.insert(position, node);
        if let Some(el) = self.element_mut(node) {
            el.parent = Some(parent);
        }
        true
    }

    /// Remove `id` and its subtree from the document.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || self.element(id).is_none() {
            return false;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(slot) = self
                .nodes
                .get_mut(next.index)
                .filter(|slot| slot.generation == next.generation)
            else {
                continue;
            };
            if let Some(el) = slot.element.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(next.index);
                stack.extend(el.children);
            }
        }
        true
    }

    /// Build `spec` and append it under `parent`.
    pub fn append_spec(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.create_element(&spec.tag_name);
        for (name, value) in &spec.attributes {
            self.set_attribute(id, name, value);
        }
        self.set_text(id, &spec.text);
        for child in spec.children {
            self.append_spec(id, child);
        }
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.element(id).and_then(Element::parent) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(el) = self.element_mut(id) {
            el.parent = None;
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.element(node).and_then(Element::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).and_then(Element::parent);
        }
        false
    }

    /// All elements under `scope` (exclusive) in document order.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .element(scope)
            .map(|el| el.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            if let Some(el) = self.element(id) {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Concatenated text of `id` and its subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = self.element(id).map(|el| el.text.clone()).unwrap_or_default();
        for child in self.descendants(id) {
            if let Some(el) = self.element(child) {
                text.push_str(&el.text);
            }
        }
        text
    }

    /// First element in the tree matching `matcher`.
    pub fn query_selector(&self, matcher: &ElementMatcher) -> Option<NodeId> {
        self.query_within(self.root, matcher).into_iter().next()
    }

    /// All elements in the tree matching `matcher`.
    pub fn query_selector_all(&self, matcher: &ElementMatcher) -> Vec<NodeId> {
        self.query_within(self.root, matcher)
    }

    /// Matching descendants of `scope`.
    pub fn query_within(&self, scope: NodeId, matcher: &ElementMatcher) -> Vec<NodeId> {
        let mut out = Vec::new();
        if scope == self.root && self.element(scope).is_some_and(|el| matcher.matches(el)) {
            out.push(scope);
        }
        out.extend(
            self.descendants(scope)
                .into_iter()
                .filter(|id| self.element(*id).is_some_and(|el| matcher.matches(el))),
        );
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&ElementMatcher::id(id))
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
