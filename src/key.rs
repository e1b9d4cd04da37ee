#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::SlotId;

#[cfg(feature = "std")]
pub(crate) type ViewSlotMap<K> = HashMap<K, SlotId>;
#[cfg(not(feature = "std"))]
pub(crate) type ViewSlotMap<K> = BTreeMap<K, SlotId>;

/// Identity of a realized native view, as reported by [`crate::RenderEngine::view_id`].
///
/// With `std` this is `Hash + Eq`; without it, `Ord`.
#[cfg(feature = "std")]
pub trait ViewKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> ViewKey for K {}

#[cfg(not(feature = "std"))]
pub trait ViewKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> ViewKey for K {}
