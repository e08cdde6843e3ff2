use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Identifies a listener registered through [`Dom::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(pub u64);

/// Something a listener can be attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<N> {
    Node(N),
    Window,
    /// A media query list (`matchMedia(query)`).
    Media(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    TouchStart,
    TouchEnd,
    TransitionEnd,
    Resize,
    MediaChange,
}

/// An event delivered by the host to [`crate::CarouselWidget::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Click,
    MouseEnter,
    MouseLeave,
    /// `clientX` of the first touch point.
    TouchStart { x: f32 },
    /// `clientX` of the first changed touch point.
    TouchEnd { x: f32 },
    TransitionEnd,
    Resize,
    MediaChange { matches: bool },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click => EventKind::Click,
            Self::MouseEnter => EventKind::MouseEnter,
            Self::MouseLeave => EventKind::MouseLeave,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchEnd { .. } => EventKind::TouchEnd,
            Self::TransitionEnd => EventKind::TransitionEnd,
            Self::Resize => EventKind::Resize,
            Self::MediaChange { .. } => EventKind::MediaChange,
        }
    }
}

/// The rendering port: the subset of a DOM the carousel needs.
///
/// Implementations own the element tree and the listener registry. A browser implementation
/// forwards to `web-sys`; [`crate::MemoryDom`] keeps everything in memory for tests and demos.
///
/// Selectors are opaque strings passed through to the implementation.
pub trait Dom {
    type Node: Clone + PartialEq + fmt::Debug;

    /// First element in the document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// Every element in the document matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Deep-clones `node` (detached).
    fn clone_node(&mut self, node: &Self::Node) -> Self::Node;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    fn prepend_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Detaches `node` from its parent.
    fn remove(&mut self, node: &Self::Node);

    fn remove_children(&mut self, node: &Self::Node);

    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Sets a `data-*` attribute; `key` is given without the `data-` prefix, kebab-cased.
    fn set_data(&mut self, node: &Self::Node, key: &str, value: &str);

    fn set_text(&mut self, node: &Self::Node, text: &str);

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool);

    /// Sets an inline style property; `None` removes it.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: Option<&str>);

    fn offset_width(&self, node: &Self::Node) -> u32;

    fn viewport_width(&self) -> u32;

    fn match_media(&self, query: &str) -> bool;

    fn listen(&mut self, target: &Target<Self::Node>, kind: EventKind) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);
}
