use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Human-authored text for diagram labels.
///
/// Two independent maps, both optional: short tooltip text and long description text. Instances
/// are immutable once built and shared as `Arc<Annotations>`; changing either map means building
/// a new value and handing it to [`crate::DiagramInstance::set_annotations`].
///
/// Empty strings are treated as absent entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    tooltips: FxHashMap<String, String>,
    descriptions: FxHashMap<String, String>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_maps<T, D, K, V>(tooltips: T, descriptions: D) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        D: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tooltips: tooltips
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            descriptions: descriptions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_tooltip(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.tooltips.insert(label.into(), text.into());
        self
    }

    pub fn with_description(mut self, label: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions.insert(label.into(), text.into());
        self
    }

    fn tooltip_entry(&self, label: &str) -> Option<&str> {
        self.tooltips
            .get(label)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    fn description_entry(&self, label: &str) -> Option<&str> {
        self.descriptions
            .get(label)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Tooltip text: the tooltip map entry, else the label itself.
    ///
    /// Unlike [`Annotations::description`], this never consults the built-in pseudo-label table.
    pub fn tooltip<'a>(&'a self, label: &'a str) -> &'a str {
        self.tooltip_entry(label).unwrap_or(label)
    }

    /// Description text: the description map entry, else the tooltip map entry, else the
    /// built-in text for canonical pseudo-labels.
    ///
    /// `None` leaves the element tooltip-only (not activatable).
    pub fn description(&self, label: &str) -> Option<&str> {
        self.description_entry(label)
            .or_else(|| self.tooltip_entry(label))
            .or_else(|| builtin_description(label))
    }
}

/// Fallback descriptions for state-machine pseudo-labels and branch labels.
pub fn builtin_description(label: &str) -> Option<&'static str> {
    match label {
        "Start" => Some("Entry point of the state machine."),
        "End" => Some("Terminal state of the state machine."),
        "Decision" => Some("Branch point that routes to different states based on conditions."),
        "Yes" | "True" => Some("Condition evaluated to true; taking the positive branch."),
        "No" | "False" => Some("Condition evaluated to false; taking the alternative branch."),
        _ => None,
    }
}
