//! Node handlers.
//!
//! | Family | Tags |
//! |--------|------|
//! | `literal` | `true` `false` `self` `nil` `int` `float` `str` `sym` |
//! | `regexp` | `regexp` `dregx` `match_current_line` |
//! | `dynamic` | `dstr` `dsym` |
//! | `xstring` | `xstr` `dxstr` |
//! | `range` | `irange` `erange` |
//! | `definitions` | `begin` `kwbegin` `evstr` `paren` `svalue` `alias` `undef` |
//! | `control` | `js_return` `return` `if` |
//! | `variables` | `lvar` `lasgn` `ivar` `gvar` `const` |
//! | `call` | `send` |
//! | `scope_bodies` | `module` `class` |
//!
//! Kinds without an entry (`rescue`, `next`, ...) fail with
//! `UnknownNodeKind` until a handler is registered for them.

pub mod call;
pub mod control;
pub mod definitions;
pub mod dynamic;
pub mod literal;
pub mod range;
pub mod regexp;
pub mod scope_bodies;
pub mod variables;
pub mod xstring;

use crate::registry::RegistryBuilder;
use garnet_ast::Tag;

/// Register every built-in handler.
pub fn register_defaults(builder: &mut RegistryBuilder) {
    builder
        .register(
            &[Tag::True, Tag::False, Tag::SelfRef, Tag::Nil],
            literal::ValueNode,
        )
        .register(&[Tag::Int, Tag::Float], literal::NumericNode)
        .register(&[Tag::Str], literal::StringNode)
        .register(&[Tag::Sym], literal::SymbolNode)
        .register(&[Tag::Regexp], regexp::RegexpNode)
        .register(&[Tag::Dregx], regexp::DynamicRegexpNode)
        .register(&[Tag::MatchCurrentLine], regexp::MatchCurrentLineNode)
        .register(&[Tag::Dstr], dynamic::DynamicStringNode)
        .register(&[Tag::Dsym], dynamic::DynamicSymbolNode)
        .register(&[Tag::Xstr, Tag::Dxstr], xstring::XStringNode)
        .register(&[Tag::Irange], range::RangeNode { exclusive: false })
        .register(&[Tag::Erange], range::RangeNode { exclusive: true })
        .register(&[Tag::Begin, Tag::KwBegin, Tag::Evstr], definitions::BeginNode)
        .register(&[Tag::Paren], definitions::ParenNode)
        .register(&[Tag::Svalue], definitions::SvalueNode)
        .register(&[Tag::Alias], definitions::AliasNode)
        .register(&[Tag::Undef], definitions::UndefNode)
        .register(&[Tag::JsReturn, Tag::Return], control::ReturnNode)
        .register(&[Tag::If], control::IfNode)
        .register(&[Tag::Lvar], variables::LocalVariableNode)
        .register(&[Tag::Lasgn], variables::LocalAssignNode)
        .register(&[Tag::Ivar], variables::InstanceVariableNode)
        .register(&[Tag::Gvar], variables::GlobalVariableNode)
        .register(&[Tag::Const], variables::ConstNode)
        .register(&[Tag::Send], call::SendNode)
        .register(&[Tag::Module], scope_bodies::ModuleNode)
        .register(&[Tag::Class], scope_bodies::ClassNode);
}
