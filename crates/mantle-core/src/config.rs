use crate::page::TooltipSpec;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipOptions {
    pub delay_in_ms: u64,
    pub delay_out_ms: u64,
    pub theme: String,
    pub hide_on_click: bool,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            delay_in_ms: 150,
            delay_out_ms: 0,
            theme: "light".to_string(),
            hide_on_click: false,
        }
    }
}

impl TooltipOptions {
    pub fn spec(&self, content: &str) -> TooltipSpec {
        TooltipSpec {
            content: content.to_string(),
            delay_in: Duration::from_millis(self.delay_in_ms),
            delay_out: Duration::from_millis(self.delay_out_ms),
            theme: self.theme.clone(),
            hide_on_click: self.hide_on_click,
        }
    }
}

/// Per-page overlay settings.
///
/// `site_config` is not interpreted here; it is forwarded to renderer backends (Mermaid-style
/// site config: theme, theme variables, flowchart spacing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    pub tooltip: TooltipOptions,
    pub placeholder_prefix: String,
    pub aria_label_prefix: String,
    pub site_config: Value,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            tooltip: TooltipOptions::default(),
            placeholder_prefix: "Mermaid error: ".to_string(),
            aria_label_prefix: "Show info for ".to_string(),
            site_config: default_site_config(),
        }
    }
}

impl OverlayConfig {
    /// Parses JSON overrides and deep-merges them onto the defaults.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, &overrides);
        Ok(serde_json::from_value(base)?)
    }
}

/// Dark theme used by the site's diagrams.
pub fn default_site_config() -> Value {
    json!({
        "startOnLoad": false,
        "theme": "base",
        "securityLevel": "loose",
        "themeVariables": {
            "background": "transparent",
            "primaryColor": "#111827",
            "primaryBorderColor": "#94a3b8",
            "primaryTextColor": "#e5e7eb",
            "lineColor": "#cbd5e1",
            "secondaryColor": "#0b1220",
            "tertiaryColor": "#111827",
            "clusterBkg": "#0f172a80",
            "clusterBorderColor": "#64748b",
            "edgeLabelBackground": "#111827"
        },
        "flowchart": {
            "htmlLabels": true,
            "curve": "basis",
            "padding": 16,
            "nodeSpacing": 70,
            "rankSpacing": 60,
            "useMaxWidth": true
        },
        "gantt": {
            "barHeight": 72,
            "barGap": 16,
            "topPadding": 100,
            "titleTopMargin": 40,
            "leftPadding": 120
        },
        "fontFamily": "Inter, ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Cantarell, Noto Sans, \"Helvetica Neue\", Arial, \"Apple Color Emoji\", \"Segoe UI Emoji\""
    })
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
