//! Headless collaborators for the `listbridge` crate.
//!
//! `listbridge` only talks to a rendering engine and a recycling list control through traits.
//! This crate provides small, framework-neutral implementations of both, for tests, demos and
//! as a reference for real adapters:
//!
//! - [`TreeEngine`]: a retained-mode engine that realizes [`Node`] trees into native nodes,
//!   batching work until it is flushed
//! - [`RecyclingHost`]: a list control that recycles views through per-template pools
#![forbid(unsafe_code)]

mod engine;
mod host;
mod node;


pub use engine::{NativeView, RenderError, RootId, TreeEngine};
pub use host::RecyclingHost;
pub use node::{NativeId, NativeNode, Node};
