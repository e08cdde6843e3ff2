use alloc::vec::Vec;

use crate::{Dom, EventKind, ListenerId, Target};

/// What the widget does when a subscribed event arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Prev,
    Next,
    GoToPage(usize),
    PauseAutoplay,
    ResumeAutoplay,
    TouchStart,
    TouchEnd,
    TransitionEnd,
    Resize,
    MediaChange,
}

/// A live listener registration.
#[derive(Clone, Debug, PartialEq)]
pub struct Subscription<N> {
    pub id: ListenerId,
    pub target: Target<N>,
    pub kind: EventKind,
    pub action: Action,
}

/// A set of subscriptions that can be torn down in one call.
///
/// Every registration goes through [`Subscriptions::subscribe`], so after
/// [`Subscriptions::unsubscribe_all`] the port holds no listener that could call back into a
/// torn-down widget.
#[derive(Clone, Debug)]
pub struct Subscriptions<N> {
    entries: Vec<Subscription<N>>,
}

impl<N> Default for Subscriptions<N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq> Subscriptions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        target: Target<N>,
        kind: EventKind,
        action: Action,
    ) -> ListenerId {
        let id = dom.listen(&target, kind);
        atrace!(id = id.0, ?kind, ?action, "subscribe");
        self.entries.push(Subscription {
            id,
            target,
            kind,
            action,
        });
        id
    }

    pub fn action_for(&self, id: ListenerId) -> Option<Action> {
        self.entries.iter().find(|s| s.id == id).map(|s| s.action)
    }

    /// Subscriptions registered for `kind` on `target`, in registration order.
    pub fn matching(&self, target: &Target<N>, kind: EventKind) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|s| s.kind == kind && &s.target == target)
            .map(|s| s.id)
            .collect()
    }

    /// Unregisters every subscription. Returns how many were removed.
    pub fn unsubscribe_all<D: Dom<Node = N>>(&mut self, dom: &mut D) -> usize {
        let n = self.entries.len();
        for s in self.entries.drain(..) {
            dom.unlisten(s.id);
        }
        n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subscription<N>> {
        self.entries.iter()
    }
}
