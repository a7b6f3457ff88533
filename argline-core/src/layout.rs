//! Help layout settings.

use serde::{Deserialize, Serialize};

/// Column settings for help rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpLayout {
    /// Column at which the usage synopsis wraps
    pub width: usize,
    /// Indentation of option table rows
    pub indent: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let layout: HelpLayout = serde_json::from_str(r#"{ "width": 100 }"#).unwrap();
        assert_eq!(layout, HelpLayout { width: 100, indent: 4 });
    }
}
