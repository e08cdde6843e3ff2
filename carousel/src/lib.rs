//! A headless carousel engine.
//!
//! For DOM-style bindings (rendering port, subscriptions, timers), see the `carousel-adapter`
//! crate.
//!
//! This crate focuses on the state and math behind a paged slider: responsive slide counts,
//! the infinite-loop illusion built from cloned slides, wraparound correction after a
//! transition, page/counter derivation and the "one transition at a time" navigation lock.
//!
//! It is UI-agnostic. A rendering layer is expected to provide:
//! - the number of authored slides
//! - viewport width (for breakpoints) and container width (for pixel offsets)
//! - transition-end notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod carousel;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use carousel::{Carousel, OnChangeCallback};
pub use options::{CarouselOptions, ControlSelectors, SlidesToShow};
pub use state::{CarouselState, PageInfo};
pub use types::{ArrowState, Change, Direction, Motion, Slot};
