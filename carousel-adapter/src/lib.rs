//! DOM-style bindings for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and owns the paging math and state. This crate wires it
//! to a document through a small rendering port:
//!
//! - [`Dom`]: the element/attribute/style/listener surface a host implements
//! - [`CarouselWidget`]: clones, pagination dots, counters, arrows and track positioning
//! - [`Subscriptions`]: every listener the widget registers, removable in one call
//! - [`Interval`] and [`Debouncer`]: autoplay and resize timers driven by host ticks
//! - [`Marquee`]: the scrolling-text injector
//!
//! [`MemoryDom`] is an in-memory port used by the tests and demos.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod dom;
mod error;
mod marquee;
mod memory;
mod subscription;
mod timer;
mod widget;


pub use carousel;

pub use debounce::{Debounced, Debouncer, RESIZE_DEBOUNCE_MS, debounce};
pub use dom::{Dom, Event, EventKind, ListenerId, Target};
pub use error::{CarouselError, Result};
pub use marquee::{MARQUEE_TEXT_DATA_KEY, Marquee};
pub use memory::{MemoryDom, NodeId};
pub use subscription::{Action, Subscription, Subscriptions};
pub use timer::Interval;
pub use widget::{
    ACTIVE_CLASS, CLONE_CLASSES, CarouselWidget, DOT_CLASS, DOT_PAGE_DATA_KEY, HIDDEN_LABEL_CLASS,
};
