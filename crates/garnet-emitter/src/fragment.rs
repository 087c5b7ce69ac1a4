//! Fragment Buffer.
//!
//! Handlers never build one big string: they append [`Fragment`]s, each
//! remembering the source position it came from, so the final unit can be
//! turned into both output text and a source map.

use garnet_common::SourcePosition;
use garnet_common::limits::FRAGMENT_BUFFER_CAPACITY;

/// A piece of emitted text with an optional originating source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub origin: Option<SourcePosition>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, origin: Option<SourcePosition>) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// Ordered sequence of fragments owned by one handler invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FragmentBuffer {
    fragments: Vec<Fragment>,
}

impl FragmentBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fragments: Vec::with_capacity(FRAGMENT_BUFFER_CAPACITY),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|f| f.text.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn push_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn push_text(&mut self, text: impl Into<String>, origin: Option<SourcePosition>) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(Fragment::new(text, origin));
        }
    }

    /// Move every fragment of `other` to the end of this buffer.
    pub fn append(&mut self, other: FragmentBuffer) {
        self.fragments.extend(other.fragments);
    }

    /// Surround the current contents with `prefix` and `suffix`.
    pub fn wrap(&mut self, prefix: &str, suffix: &str, origin: Option<SourcePosition>) {
        if !prefix.is_empty() {
            self.fragments.insert(0, Fragment::new(prefix, origin));
        }
        self.push_text(suffix, origin);
    }

    /// Whether the concatenated text, ignoring trailing whitespace, ends with
    /// `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        for fragment in self.fragments.iter().rev() {
            let trimmed = fragment.text.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            // Suffixes are single tokens, they never straddle fragments
            return trimmed.ends_with(suffix);
        }
        false
    }

    /// Concatenated text.
    #[must_use]
    pub fn to_code(&self) -> String {
        let mut out = String::with_capacity(self.fragments.iter().map(|f| f.text.len()).sum());
        for fragment in &self.fragments {
            out.push_str(&fragment.text);
        }
        out
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Fragment> {
        self.fragments
    }
}

impl<'a> IntoIterator for &'a FragmentBuffer {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

// =============================================================================
// Pushable pieces
// =============================================================================

/// Anything a handler can push: literal text, fragments, compiled children,
/// and tuples of those (`push(("new RegExp(", value, ")"))`).
///
/// Plain text picks up the pushing node's position as its origin; already
/// built fragments keep their own.
pub trait IntoFragments {
    fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>);
}

impl IntoFragments for &str {
    fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>) {
        buf.push_text(self, origin);
    }
}

impl IntoFragments for String {
    fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>) {
        buf.push_text(self, origin);
    }
}

impl IntoFragments for &String {
    fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>) {
        buf.push_text(self.as_str(), origin);
    }
}

impl IntoFragments for Fragment {
    fn push_into(self, buf: &mut FragmentBuffer, _origin: Option<SourcePosition>) {
        buf.push_fragment(self);
    }
}

impl IntoFragments for FragmentBuffer {
    fn push_into(self, buf: &mut FragmentBuffer, _origin: Option<SourcePosition>) {
        buf.append(self);
    }
}

impl<T: IntoFragments> IntoFragments for Option<T> {
    fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>) {
        if let Some(piece) = self {
            piece.push_into(buf, origin);
        }
    }
}

macro_rules! impl_into_fragments_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: IntoFragments),+> IntoFragments for ($($name,)+) {
            #[allow(non_snake_case)]
            fn push_into(self, buf: &mut FragmentBuffer, origin: Option<SourcePosition>) {
                let ($($name,)+) = self;
                $($name.push_into(buf, origin);)+
            }
        }
    };
}

impl_into_fragments_for_tuple!(A, B);
impl_into_fragments_for_tuple!(A, B, C);
impl_into_fragments_for_tuple!(A, B, C, D);
impl_into_fragments_for_tuple!(A, B, C, D, E);
impl_into_fragments_for_tuple!(A, B, C, D, E, F);
impl_into_fragments_for_tuple!(A, B, C, D, E, F, G);
impl_into_fragments_for_tuple!(A, B, C, D, E, F, G, H);
