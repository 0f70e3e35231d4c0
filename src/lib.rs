//! Video tile grid layout with big-tile regions and cover cropping.
//!
//! Pure geometry — no pixel operations, no I/O, `no_std` compatible
//! (requires `alloc`). Every function is a total, synchronous computation
//! over its inputs: safe to call repeatedly and concurrently, with caching
//! and call cadence left to the owning render loop.
//!
//! # Modules
//!
//! - [`layout`] — tile descriptors, layout options, and the big/small
//!   region composition ([`compute_layout`])
//! - [`grid`] — grid subdivision search ([`best_dimensions`]) and row
//!   placement
//! - [`crop`] — centered cover-crop computation ([`cover_crop`])

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod crop;
pub mod grid;
pub mod layout;

// Re-exports: core types and entry points
pub use crop::cover_crop;
pub use grid::{Dimensions, best_dimensions};
pub use layout::{AlignItems, LayoutError, LayoutOptions, Rect, Size, Tile, compute_layout};
