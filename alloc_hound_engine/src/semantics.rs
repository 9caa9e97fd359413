// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The semantic oracle: the read-only query surface the host compiler
//! exposes over one syntax tree.
//!
//! The engine never re-derives type inference, symbol binding, constant
//! folding or data-flow analysis; it asks. Every answer type here is a
//! plain value the host precomputes or resolves on demand. A missing
//! answer (`None`) means "not applicable" and classifiers skip the node.

use crate::syntax::NodeId;

/// The conversion the compiler would insert at an expression site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionKind {
    /// No conversion exists or none is needed at this site.
    #[default]
    None,
    Identity,
    ImplicitReference,
    Boxing,
    Unboxing,
    /// A bare method reference converted to a delegate type.
    MethodGroup,
}

/// Runtime-special type identities the classifiers test against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialKind {
    #[default]
    NotSpecial,
    Bool,
    Char,
    NativeInt,
    NativeUint,
    PlatformString,
    /// The non-generic base enumerator interface.
    BaseEnumerator,
    /// The generic enumerator interface.
    GenericEnumerator,
}

impl SpecialKind {
    /// The four value kinds the runtime converts to a reference shape
    /// without a true heap allocation; boxing rules exempt them.
    pub fn is_optimized_value(&self) -> bool {
        matches!(
            self,
            SpecialKind::Bool | SpecialKind::Char | SpecialKind::NativeInt | SpecialKind::NativeUint
        )
    }
}

/// Resolved facts about a type, as far as the classifiers care.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeFacts {
    /// Full display name, used in finding messages.
    pub display: String,
    /// Short type name (`IEnumerable`, `String`, ...).
    pub name: String,
    pub special: SpecialKind,
    pub is_reference: bool,
    pub is_error: bool,
    pub is_delegate: bool,
    /// Return type of a directly declared enumerator-factory member, if
    /// the type declares one.
    pub declared_enumerator: Option<Box<TypeFacts>>,
    /// Implemented interfaces that can supply an enumerator factory.
    pub interfaces: Vec<TypeFacts>,
    /// Special identities found anywhere in the transitive interface set.
    pub interface_specials: Vec<SpecialKind>,
}

impl TypeFacts {
    pub fn reference(display: impl Into<String>) -> Self {
        let display = display.into();
        Self {
            name: short_name(&display),
            display,
            is_reference: true,
            ..Self::default()
        }
    }

    pub fn value(display: impl Into<String>) -> Self {
        let display = display.into();
        Self {
            name: short_name(&display),
            display,
            is_reference: false,
            ..Self::default()
        }
    }

    pub fn platform_string() -> Self {
        Self::reference("System.String").with_special(SpecialKind::PlatformString)
    }

    pub fn with_special(mut self, special: SpecialKind) -> Self {
        self.special = special;
        self
    }

    pub fn with_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    pub fn as_delegate(mut self) -> Self {
        self.is_delegate = true;
        self
    }

    pub fn with_declared_enumerator(mut self, return_type: TypeFacts) -> Self {
        self.declared_enumerator = Some(Box::new(return_type));
        self
    }

    pub fn with_interface(mut self, interface: TypeFacts) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_interface_special(mut self, special: SpecialKind) -> Self {
        self.interface_specials.push(special);
        self
    }

    pub fn is_platform_string(&self) -> bool {
        self.special == SpecialKind::PlatformString
    }
}

fn short_name(display: &str) -> String {
    let base = display.split('<').next().unwrap_or(display);
    base.rsplit('.').next().unwrap_or(base).to_string()
}

/// What kind of program entity a reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolKind {
    Method,
    Local,
    Parameter,
    Field,
    Property,
    #[default]
    Other,
}

/// Resolved facts about a symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolFacts {
    pub name: String,
    pub kind: SymbolKind,
    pub is_static: bool,
    /// The symbol is a local function rather than a member method.
    pub is_local_function: bool,
    /// For instance methods, the receiver (containing) type.
    pub receiver: Option<TypeFacts>,
    pub return_type: Option<TypeFacts>,
    /// Type-parameter arity of the containing method, for the
    /// delegate-in-generic-method rule.
    pub containing_method_arity: u32,
}

impl SymbolFacts {
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Method,
            ..Self::default()
        }
    }

    pub fn static_method(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::method(name)
        }
    }

    pub fn local_function(name: impl Into<String>) -> Self {
        Self {
            is_local_function: true,
            ..Self::method(name)
        }
    }

    pub fn static_local_function(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::local_function(name)
        }
    }

    pub fn with_receiver(mut self, receiver: TypeFacts) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeFacts) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn in_generic_method(mut self, arity: u32) -> Self {
        self.containing_method_arity = arity;
        self
    }
}

/// A compile-time constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

/// One captured outer variable (or the enclosing instance) observed in a
/// nested function body.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub name: String,
    /// Source positions where the capture is observed, in document order.
    pub spans: Vec<alloc_hound_common::span::SourceSpan>,
    pub is_enclosing_instance: bool,
}

/// Ordered capture analysis of one lambda/anonymous-method body.
///
/// Contract carried over from the host compiler's data-flow analysis:
/// captures are attributed to the lexical scope of the introducing block,
/// which can over-report when capturing and non-capturing lambdas share
/// an outer block. Callers accept that; see the closure classifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureSet {
    pub captured: Vec<Capture>,
}

impl CaptureSet {
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// The single special case in the model: a set whose only element is
    /// the enclosing instance needs no display class.
    pub fn is_only_enclosing_instance(&self) -> bool {
        self.captured.len() == 1 && self.captured[0].is_enclosing_instance
    }

    pub fn joined_names(&self) -> String {
        self.captured
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Read-only semantic queries over one tree. Constructed once per
/// compilation unit and shared by every classifier for that unit; must
/// tolerate concurrent reads.
pub trait SemanticOracle: Sync {
    /// Static type of an expression, if it resolved.
    fn expression_type(&self, node: NodeId) -> Option<&TypeFacts>;

    /// Type of the expression as seen after the implicit conversion the
    /// site applies, if any.
    fn converted_type(&self, node: NodeId) -> Option<&TypeFacts>;

    /// The conversion the compiler inserts at this expression's site.
    fn conversion_at(&self, node: NodeId) -> ConversionKind;

    /// Symbol a reference resolves to, if it resolved.
    fn resolved_symbol(&self, node: NodeId) -> Option<&SymbolFacts>;

    /// The expression's compile-time constant value, if it has one.
    fn constant_value(&self, node: NodeId) -> Option<&ConstValue>;

    /// Capture analysis for a lambda/anonymous-method node.
    fn captures(&self, node: NodeId) -> Option<&CaptureSet>;
}
