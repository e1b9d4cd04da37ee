//! Drive a recycling list control from declarative item templates.
//!
//! A recycling list control keeps a small pool of physical view slots and hands the same slot
//! back for different items while scrolling. This crate sits between that control and a
//! declarative rendering engine:
//!
//! - child template declarations register into a per-list [`TemplateRegistry`] through a
//!   [`TemplateScope`] while the list mounts
//! - for each item the control needs, [`select`] picks the first template whose condition holds
//! - [`SlotManager::patch`] either mounts into a fresh container (empty slot) or re-renders into
//!   the slot's existing container (recycled slot), then flushes the engine
//!
//! The engine and the list control are abstracted by [`RenderEngine`] and [`ListHost`]. See the
//! `listbridge-host` crate for headless implementations of both.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bridge;
mod context;
mod engine;
mod error;
mod key;
mod options;
mod registry;
mod scope;
mod selector;
mod slot;
mod template;

#[cfg(test)]
mod tests;

pub use bridge::{ListBridge, ListBuilder};
pub use context::{ContextNames, ContextValue, EVEN_NAME, ItemContext, ODD_NAME};
pub use engine::{ListHost, RenderEngine};
pub use error::{BridgeError, ConditionError, PatchError, TemplateNotFound};
pub use key::ViewKey;
pub use options::{BridgeOptions, DEFAULT_TEMPLATE};
pub use registry::TemplateRegistry;
pub use scope::TemplateScope;
pub use selector::select;
pub use slot::{SlotId, SlotManager, ViewSlot};
pub use template::{Condition, KeyedTemplate, RenderFn, TemplateDeclaration, TemplateDescriptor};
