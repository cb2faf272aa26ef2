use crate::element::ElementId;
use crate::page::TooltipHandle;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;

/// Render generation token.
///
/// Every render request takes a fresh generation; only the result tagged with the most recently
/// requested generation is ever applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub const INITIAL: Generation = Generation(0);

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Arena of side effects produced by one attach pass.
///
/// A scope is created at the start of a pass and released, as a whole, before the next pass
/// creates anything (see [`crate::TooltipManager::release`]). Annotation changes re-run the
/// attach pass over the same generation, so a scope is keyed by `(generation, pass)`.
#[derive(Debug, Clone, Default)]
pub struct GenerationScope {
    generation: Generation,
    pass: u32,
    tooltips: IndexMap<ElementId, TooltipHandle>,
    activatable: FxHashMap<ElementId, String>,
}

impl GenerationScope {
    pub fn new(generation: Generation, pass: u32) -> Self {
        Self {
            generation,
            pass,
            tooltips: IndexMap::new(),
            activatable: FxHashMap::default(),
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pass(&self) -> u32 {
        self.pass
    }

    pub fn tooltip_for(&self, element: ElementId) -> Option<TooltipHandle> {
        self.tooltips.get(&element).copied()
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }

    pub(crate) fn insert_tooltip(&mut self, element: ElementId, handle: TooltipHandle) {
        self.tooltips.insert(element, handle);
    }

    /// Removes every tooltip handle, in creation order.
    pub(crate) fn take_tooltips(&mut self) -> Vec<(ElementId, TooltipHandle)> {
        self.tooltips.drain(..).collect()
    }

    /// Label recorded for an activatable element of this pass.
    pub fn activation_label(&self, element: ElementId) -> Option<&str> {
        self.activatable.get(&element).map(String::as_str)
    }

    pub fn activatable_count(&self) -> usize {
        self.activatable.len()
    }

    pub(crate) fn record_activatable(&mut self, element: ElementId, label: &str) {
        self.activatable.insert(element, label.to_string());
    }

    pub(crate) fn forget_activatable(&mut self, element: ElementId) {
        self.activatable.remove(&element);
    }

    pub(crate) fn clear_activatable(&mut self) {
        self.activatable.clear();
    }
}
