//! Source Map v3 generation.
//!
//! The generator receives mappings in generated order (line by line, column
//! ascending within a line) and serializes them with the usual relative VLQ
//! encoding. Decoding is provided for tests and tooling.

use serde::Serialize;

pub mod vlq {
    //! Base64 variable-length quantities as used by the `mappings` field.

    const BASE64_CHARS: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    const VLQ_BASE_SHIFT: u32 = 5;
    const VLQ_BASE: i64 = 1 << VLQ_BASE_SHIFT;
    const VLQ_BASE_MASK: i64 = VLQ_BASE - 1;
    const VLQ_CONTINUATION_BIT: i64 = VLQ_BASE;

    /// Encode a signed value; the sign lives in the least significant bit.
    #[must_use]
    pub fn encode(value: i64) -> String {
        let mut out = String::new();
        encode_into(value, &mut out);
        out
    }

    pub fn encode_into(value: i64, out: &mut String) {
        let mut vlq = if value < 0 {
            ((-value) << 1) | 1
        } else {
            value << 1
        };
        loop {
            let mut digit = vlq & VLQ_BASE_MASK;
            vlq >>= VLQ_BASE_SHIFT;
            if vlq > 0 {
                digit |= VLQ_CONTINUATION_BIT;
            }
            out.push(BASE64_CHARS[digit as usize] as char);
            if vlq == 0 {
                break;
            }
        }
    }

    fn base64_value(byte: u8) -> Option<i64> {
        let value = match byte {
            b'A'..=b'Z' => byte - b'A',
            b'a'..=b'z' => byte - b'a' + 26,
            b'0'..=b'9' => byte - b'0' + 52,
            b'+' => 62,
            b'/' => 63,
            _ => return None,
        };
        Some(i64::from(value))
    }

    /// Decode one value from the start of `input`.
    ///
    /// Returns the value and the number of bytes consumed, or `None` when the
    /// input is empty, truncated or contains a non-base64 byte.
    #[must_use]
    pub fn decode(input: &str) -> Option<(i64, usize)> {
        let mut result: i64 = 0;
        let mut shift = 0u32;
        for (i, byte) in input.bytes().enumerate() {
            let digit = base64_value(byte)?;
            result += (digit & VLQ_BASE_MASK) << shift;
            if digit & VLQ_CONTINUATION_BIT == 0 {
                let negative = result & 1 == 1;
                let magnitude = result >> 1;
                return Some((if negative { -magnitude } else { magnitude }, i + 1));
            }
            shift += VLQ_BASE_SHIFT;
            if shift > 60 {
                return None;
            }
        }
        None
    }
}

/// One generated-to-original mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_index: u32,
    pub original_line: u32,
    pub original_column: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceMapJson<'a> {
    version: u32,
    file: &'a str,
    source_root: &'a str,
    sources: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sources_content: Vec<Option<&'a str>>,
    names: &'a [String],
    mappings: String,
}

/// Collects mappings and serializes a Source Map v3 document.
#[derive(Debug, Default)]
pub struct SourceMapGenerator {
    file: String,
    sources: Vec<String>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    mappings: Vec<RawMapping>,
}

impl SourceMapGenerator {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Register a source file, returning its index. Registering the same
    /// name twice returns the existing index.
    pub fn add_source(&mut self, name: &str, content: Option<&str>) -> u32 {
        if let Some(idx) = self.sources.iter().position(|s| s == name) {
            if let Some(content) = content {
                self.sources_content[idx] = Some(content.to_string());
            }
            return idx as u32;
        }
        self.sources.push(name.to_string());
        self.sources_content.push(content.map(str::to_string));
        (self.sources.len() - 1) as u32
    }

    pub fn add_mapping(&mut self, mapping: RawMapping) {
        self.mappings.push(mapping);
    }

    #[must_use]
    pub fn mappings(&self) -> &[RawMapping] {
        &self.mappings
    }

    /// Encode the `mappings` field.
    #[must_use]
    pub fn encode_mappings(&self) -> String {
        let mut out = String::new();
        let mut current_line = 0u32;
        let mut prev_generated_column = 0i64;
        let mut prev_source = 0i64;
        let mut prev_original_line = 0i64;
        let mut prev_original_column = 0i64;
        let mut first_in_line = true;

        for mapping in &self.mappings {
            while current_line < mapping.generated_line {
                out.push(';');
                current_line += 1;
                prev_generated_column = 0;
                first_in_line = true;
            }
            if !first_in_line {
                out.push(',');
            }
            first_in_line = false;

            let generated_column = i64::from(mapping.generated_column);
            let source = i64::from(mapping.source_index);
            let original_line = i64::from(mapping.original_line);
            let original_column = i64::from(mapping.original_column);

            vlq::encode_into(generated_column - prev_generated_column, &mut out);
            vlq::encode_into(source - prev_source, &mut out);
            vlq::encode_into(original_line - prev_original_line, &mut out);
            vlq::encode_into(original_column - prev_original_column, &mut out);

            prev_generated_column = generated_column;
            prev_source = source;
            prev_original_line = original_line;
            prev_original_column = original_column;
        }
        out
    }

    /// Serialize the whole document as JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let has_content = self.sources_content.iter().any(Option::is_some);
        let doc = SourceMapJson {
            version: 3,
            file: &self.file,
            source_root: "",
            sources: &self.sources,
            sources_content: if has_content {
                self.sources_content.iter().map(Option::as_deref).collect()
            } else {
                Vec::new()
            },
            names: &self.names,
            mappings: self.encode_mappings(),
        };
        serde_json::to_string(&doc)
    }
}
