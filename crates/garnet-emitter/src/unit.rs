//! Output of a compilation unit.

use crate::fragment::Fragment;
use crate::options::CompilerOptions;
use crate::scope::Scope;
use garnet_common::SourcePosition;
use garnet_common::source_map::{RawMapping, SourceMapGenerator};
use indexmap::IndexSet;

/// One output-offset to source-position entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mapping {
    /// Byte offset of the fragment in [`CompiledUnit::code`].
    pub output_offset: usize,
    /// 0-based generated line.
    pub generated_line: u32,
    /// 0-based generated column, in UTF-16 code units.
    pub generated_column: u32,
    pub original: SourcePosition,
}

/// Fragments of a compiled unit plus the signals the toolchain needs.
#[derive(Clone, Debug)]
pub struct CompiledUnit {
    fragments: Vec<Fragment>,
    helpers: IndexSet<String>,
    locals: IndexSet<String>,
    declared_method_names: Vec<String>,
    file: String,
    source: String,
}

impl CompiledUnit {
    pub(crate) fn new(fragments: Vec<Fragment>, top: Scope, options: &CompilerOptions) -> Self {
        Self {
            fragments,
            helpers: top.required_helpers,
            locals: top.locals,
            declared_method_names: top.declared_method_names,
            file: options.file.clone(),
            source: options.source_name().to_string(),
        }
    }

    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Runtime helpers required anywhere in the unit, in first-use order.
    #[must_use]
    pub fn helpers(&self) -> &IndexSet<String> {
        &self.helpers
    }

    /// Locals declared directly in the top scope.
    #[must_use]
    pub fn locals(&self) -> &IndexSet<String> {
        &self.locals
    }

    /// Method names contributed to the top scope (aliases, definitions).
    #[must_use]
    pub fn declared_method_names(&self) -> &[String] {
        &self.declared_method_names
    }

    /// Output text.
    #[must_use]
    pub fn code(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// One mapping per fragment that carries an origin.
    #[must_use]
    pub fn mappings(&self) -> Vec<Mapping> {
        let mut mappings = Vec::new();
        let mut offset = 0usize;
        let mut line = 0u32;
        let mut column = 0u32;

        for fragment in &self.fragments {
            if let Some(original) = fragment.origin {
                if !fragment.text.is_empty() {
                    mappings.push(Mapping {
                        output_offset: offset,
                        generated_line: line,
                        generated_column: column,
                        original,
                    });
                }
            }

            offset += fragment.text.len();
            match fragment.text.rfind('\n') {
                Some(idx) => {
                    line += memchr::memchr_iter(b'\n', fragment.text.as_bytes()).count() as u32;
                    column = utf16_len(&fragment.text[idx + 1..]);
                }
                None => column += utf16_len(&fragment.text),
            }
        }
        mappings
    }

    /// Source Map v3 document for [`Self::code`].
    pub fn source_map_json(&self) -> serde_json::Result<String> {
        let mut generator = SourceMapGenerator::new(self.file.as_str());
        let source_index = generator.add_source(&self.source, None);
        for mapping in self.mappings() {
            generator.add_mapping(RawMapping {
                generated_line: mapping.generated_line,
                generated_column: mapping.generated_column,
                source_index,
                original_line: mapping.original.zero_based_line(),
                original_column: mapping.original.column,
            });
        }
        generator.to_json()
    }
}

fn utf16_len(text: &str) -> u32 {
    text.chars().map(char::len_utf16).sum::<usize>() as u32
}
