//! Compiler configuration.

use crate::scope::ScopeKind;
use garnet_common::limits::MAX_COMPILE_DEPTH;
use serde::{Deserialize, Serialize};

fn default_file() -> String {
    "(file)".to_string()
}

fn default_max_depth() -> u32 {
    MAX_COMPILE_DEPTH
}

/// Options for one compilation unit.
///
/// ```json
/// { "file": "app.js", "source": "app.rb", "maxDepth": 200, "unitScope": "class" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerOptions {
    /// Logical output name, used in diagnostics and as the source map `file`.
    #[serde(default = "default_file")]
    pub file: String,
    /// Source file name recorded in the source map; defaults to `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Maximum node nesting depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Kind of the unit's top-level scope.
    #[serde(default)]
    pub unit_scope: ScopeKind,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            file: default_file(),
            source: None,
            max_depth: default_max_depth(),
            unit_scope: ScopeKind::Module,
        }
    }
}

impl CompilerOptions {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    #[must_use]
    pub fn with_unit_scope(mut self, kind: ScopeKind) -> Self {
        self.unit_scope = kind;
        self
    }

    /// Name written into the source map `sources` array.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.file)
    }
}
