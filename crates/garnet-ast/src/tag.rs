//! Node kind tags.
//!
//! The set is closed per compiler version; the dispatch registry decides
//! which of them can actually be compiled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_tags {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// Kind of an AST node, spelled like the parser's node types.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Tag {
            $(
                $(#[$meta])*
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Tag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [Tag] = &[$(Tag::$variant,)+];

            /// Parser spelling of the tag (`"dstr"`, `"kwbegin"`, ...).
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)+
                }
            }
        }

        impl FromStr for Tag {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Tag::$variant),)+
                    _ => Err(UnknownTag(s.to_string())),
                }
            }
        }
    };
}

define_tags! {
    // Values
    True => "true",
    False => "false",
    SelfRef => "self",
    Nil => "nil",
    Int => "int",
    Float => "float",
    Str => "str",
    Sym => "sym",

    // Regular expressions
    Regexp => "regexp",
    /// Trailing flag carrier of a regexp: children are single-letter names.
    RegOpt => "regopt",
    Dregx => "dregx",
    MatchCurrentLine => "match_current_line",

    // Interpolation and foreign code
    Dstr => "dstr",
    Dsym => "dsym",
    Evstr => "evstr",
    Xstr => "xstr",
    Dxstr => "dxstr",

    // Ranges
    Irange => "irange",
    Erange => "erange",

    // Sequences and grouping
    Begin => "begin",
    KwBegin => "kwbegin",
    Paren => "paren",
    Svalue => "svalue",

    // Directives
    Alias => "alias",
    Undef => "undef",

    // Control flow
    JsReturn => "js_return",
    Return => "return",
    If => "if",
    Rescue => "rescue",
    Next => "next",
    ReturnableYield => "returnable_yield",

    // Variables and calls
    Lvar => "lvar",
    Lasgn => "lasgn",
    Ivar => "ivar",
    Gvar => "gvar",
    Const => "const",
    Send => "send",

    // Scope bodies
    Module => "module",
    Class => "class",
}

impl Tag {
    /// Tags compiled by the statement-sequence handler.
    #[must_use]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Tag::Begin | Tag::KwBegin)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a tag name is not part of this compiler version.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type '{0}'")]
pub struct UnknownTag(pub String);
