//! An in-memory implementation of the [`Dom`] port.
//!
//! Supports the selector subset the widget and marquee need: comma-separated lists of compound
//! selectors made of an optional tag, `.class`, `#id`, `[attr]` and `[attr=value]` parts.
//! Combinators (descendant, child, ...) are not supported.
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{Dom, EventKind, ListenerId, Target};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    disabled: bool,
    width: u32,
}

/// A document tree kept in an arena. Removed nodes stay in the arena, detached.
#[derive(Clone, Debug)]
pub struct MemoryDom {
    nodes: Vec<NodeData>,
    viewport_width: u32,
    media: BTreeMap<String, bool>,
    listeners: BTreeMap<ListenerId, (Target<NodeId>, EventKind)>,
    next_listener: u64,
}

impl MemoryDom {
    pub fn new(viewport_width: u32) -> Self {
        let body = NodeData {
            tag: String::from("body"),
            width: viewport_width,
            ..NodeData::default()
        };
        Self {
            nodes: alloc::vec![body],
            viewport_width,
            media: BTreeMap::new(),
            listeners: BTreeMap::new(),
            next_listener: 1,
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates `tag` and appends it to `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(&parent, &node);
        node
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attrs.get(name).map(String::as_str)
    }

    pub fn data(&self, node: NodeId, key: &str) -> Option<&str> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(name, _)| name.strip_prefix("data-") == Some(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].styles.get(property).map(String::as_str)
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.nodes[node.0].disabled
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn set_width(&mut self, node: NodeId, width: u32) {
        self.nodes[node.0].width = width;
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn set_media(&mut self, query: &str, matches: bool) {
        self.media.insert(query.to_string(), matches);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Registered listeners for `kind` on `target`, in registration order.
    pub fn listeners_on(&self, target: &Target<NodeId>, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, (t, k))| *k == kind && t == target)
            .map(|(id, _)| *id)
            .collect()
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[root.0].children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn first_match(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let mut all = Vec::new();
        self.descendants(scope, &mut all);
        all.into_iter().find(|&n| self.matches(n, selector))
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .any(|compound| self.matches_compound(node, compound.trim()))
    }

    fn matches_compound(&self, node: NodeId, selector: &str) -> bool {
        if selector.is_empty() {
            return false;
        }
        let data = &self.nodes[node.0];
        let is_delim = |c: char| c == '.' || c == '#' || c == '[';

        let tag_end = selector.find(is_delim).unwrap_or(selector.len());
        let tag = &selector[..tag_end];
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&data.tag) {
            return false;
        }

        let mut rest = &selector[tag_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            match marker {
                '[' => {
                    let Some(close) = body.find(']') else {
                        return false;
                    };
                    let inner = &body[..close];
                    rest = &body[close + 1..];
                    let (name, expected) = match inner.split_once('=') {
                        Some((name, value)) => (
                            name.trim(),
                            Some(value.trim().trim_matches(|c: char| c == '"' || c == '\'')),
                        ),
                        None => (inner.trim(), None),
                    };
                    match (data.attrs.get(name), expected) {
                        (Some(_), None) => {}
                        (Some(actual), Some(expected)) if actual == expected => {}
                        _ => return false,
                    }
                }
                '.' | '#' => {
                    let end = body.find(is_delim).unwrap_or(body.len());
                    let name = &body[..end];
                    rest = &body[end..];
                    let found = if marker == '.' {
                        data.classes.iter().any(|c| c == name)
                    } else {
                        data.attrs.get("id").is_some_and(|id| id == name)
                    };
                    if !found {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }

    fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let mut data = self.nodes[node.0].clone();
        let children = core::mem::take(&mut data.children);
        data.parent = None;
        let copy = NodeId(self.nodes.len());
        self.nodes.push(data);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.first_match(self.body(), selector)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.descendants(self.body(), &mut all);
        all.retain(|&n| self.matches(n, selector));
        all
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.first_match(*scope, selector)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            ..NodeData::default()
        });
        id
    }

    fn clone_node(&mut self, node: &NodeId) -> NodeId {
        self.deep_clone(*node)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
    }

    fn prepend_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.insert(0, *child);
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn remove_children(&mut self, node: &NodeId) {
        for child in core::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        let classes = &mut self.nodes[node.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_string());
        } else if !on && present {
            classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn set_data(&mut self, node: &NodeId, key: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(alloc::format!("data-{key}"), value.to_string());
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        self.remove_children(node);
        self.nodes[node.0].text = text.to_string();
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) {
        self.nodes[node.0].disabled = disabled;
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: Option<&str>) {
        let styles = &mut self.nodes[node.0].styles;
        match value {
            Some(value) => {
                styles.insert(property.to_string(), value.to_string());
            }
            None => {
                styles.remove(property);
            }
        }
    }

    fn offset_width(&self, node: &NodeId) -> u32 {
        self.nodes[node.0].width
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn match_media(&self, query: &str) -> bool {
        self.media.get(query).copied().unwrap_or(false)
    }

    fn listen(&mut self, target: &Target<NodeId>, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (target.clone(), kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
