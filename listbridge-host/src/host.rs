use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use listbridge::{BridgeError, KeyedTemplate, ListBridge, ListHost, RenderEngine};

#[derive(Clone, Debug)]
struct Row<V> {
    key: String,
    view: V,
}

/// A recycling list control.
///
/// Visible rows hold a view each. Rows that scroll out go back to the pool of their template
/// key; rows that scroll in take a pooled view of the key the bridge selects, or ask for a new
/// one. The pool never grows beyond the largest set of rows visible at once.
#[derive(Debug)]
pub struct RecyclingHost<T, V> {
    items: Vec<T>,
    templates: Vec<KeyedTemplate>,
    pools: HashMap<String, Vec<V>>,
    rows: BTreeMap<usize, Row<V>>,
}

impl<T, V: Clone> RecyclingHost<T, V> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            templates: Vec::new(),
            pools: HashMap::new(),
            rows: BTreeMap::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replaces the data set. Every visible row is released for reuse; call
    /// [`RecyclingHost::show`] to bind the new items.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let indexes: Vec<usize> = self.rows.keys().copied().collect();
        for index in indexes {
            self.release(index);
        }
    }

    /// The keyed templates received from the bridge.
    pub fn templates(&self) -> &[KeyedTemplate] {
        &self.templates
    }

    /// Visible rows as `(index, template key, view)`, in index order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &str, &V)> {
        self.rows
            .iter()
            .map(|(index, row)| (*index, row.key.as_str(), &row.view))
    }

    pub fn view_at(&self, index: usize) -> Option<&V> {
        self.rows.get(&index).map(|row| &row.view)
    }

    /// Number of idle views pooled under `key`.
    pub fn pooled(&self, key: &str) -> usize {
        self.pools.get(key).map_or(0, Vec::len)
    }

    /// Makes `range` the visible window, recycling views as rows come and go.
    pub fn show<E>(
        &mut self,
        range: Range<usize>,
        bridge: &mut ListBridge<T, E>,
        engine: &mut E,
    ) -> Result<(), BridgeError<E::Error>>
    where
        E: RenderEngine<View = V>,
        E::ViewId: Clone,
    {
        let range = range.start.min(self.items.len())..range.end.min(self.items.len());

        let hidden: Vec<usize> = self
            .rows
            .keys()
            .copied()
            .filter(|index| !range.contains(index))
            .collect();
        for index in hidden {
            self.release(index);
        }

        for index in range {
            if self.rows.contains_key(&index) {
                continue;
            }
            let item = &self.items[index];
            let key = bridge.template_for(item, index).to_string();
            let recycled = self.pools.get_mut(&key).and_then(Vec::pop);

            match bridge.on_slot_needed(engine, item, index, recycled.as_ref()) {
                Ok(view) => {
                    self.rows.insert(index, Row { key, view });
                }
                Err(err) => {
                    if let Some(view) = recycled {
                        self.pools.entry(key).or_default().push(view);
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    fn release(&mut self, index: usize) {
        if let Some(row) = self.rows.remove(&index) {
            self.pools.entry(row.key).or_default().push(row.view);
        }
    }
}

impl<T, V> ListHost for RecyclingHost<T, V> {
    fn set_item_templates(&mut self, templates: Vec<KeyedTemplate>) {
        self.templates = templates;
    }
}
