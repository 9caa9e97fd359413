// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! The static rule catalogue. Rules are data: defined once, immutable,
//! process-wide. Which node kinds a rule can fire on is the owning
//! classifier's business, not the rule's.

use alloc_hound_common::finding::{Rule, Severity};

pub const STRING_CONCATENATION: Rule = Rule {
    id: "string-concatenation",
    title: "Implicit string concatenation allocation",
    message: "Consider using a string builder instead of concatenation",
    severity: Severity::Warn,
};

pub const BOXING_IN_CONCATENATION: Rule = Rule {
    id: "boxing-in-concatenation",
    title: "Value type to reference type conversion allocation for string concatenation",
    message: "Value type ({0}) is being boxed to a reference type for a string concatenation",
    severity: Severity::Warn,
};

pub const CLOSURE_CAPTURE: Rule = Rule {
    id: "closure-capture",
    title: "Display class allocation to capture closure",
    message: "The compiler will emit a class that will hold this as a field to allow capturing of this closure",
    severity: Severity::Warn,
};

pub const CLOSURE_SOURCE: Rule = Rule {
    id: "closure-source",
    title: "Closure allocation source",
    message: "Heap allocation of closure capturing: {0}",
    severity: Severity::Warn,
};

pub const GENERIC_METHOD_DELEGATE: Rule = Rule {
    id: "generic-method-delegate",
    title: "Lambda or anonymous method in a generic method allocates a delegate instance",
    message: "Consider moving this out of the generic method",
    severity: Severity::Warn,
};

pub const REFERENCE_ENUMERATOR: Rule = Rule {
    id: "reference-enumerator",
    title: "Possible allocation of reference type enumerator",
    message: "Non-value-type enumerator may result in a heap allocation",
    severity: Severity::Warn,
};

pub const NEW_ARRAY: Rule = Rule {
    id: "new-array",
    title: "Explicit new array type allocation",
    message: "Explicit new array type allocation",
    severity: Severity::Info,
};

pub const NEW_OBJECT: Rule = Rule {
    id: "new-object",
    title: "Explicit new reference type allocation",
    message: "Explicit new reference type allocation",
    severity: Severity::Info,
};

pub const NEW_ANONYMOUS_OBJECT: Rule = Rule {
    id: "new-anonymous-object",
    title: "Explicit new anonymous object allocation",
    message: "Explicit new anonymous object allocation",
    severity: Severity::Info,
};

pub const IMPLICIT_ARRAY: Rule = Rule {
    id: "implicit-array",
    title: "Implicit new array creation allocation",
    message: "Implicit new array creation allocation",
    severity: Severity::Info,
};

pub const INITIALIZER: Rule = Rule {
    id: "initializer",
    title: "Initializer reference type allocation",
    message: "Initializer reference type allocation",
    severity: Severity::Info,
};

pub const LET_CLAUSE: Rule = Rule {
    id: "let-clause",
    title: "Let clause induced allocation",
    message: "Let clause induced allocation",
    severity: Severity::Info,
};

pub const BOXING: Rule = Rule {
    id: "boxing",
    title: "Value type to reference type conversion causing boxing allocation",
    message: "Value type to reference type conversion causes boxing at call site (here), and unboxing at the callee-site. Consider using generics if applicable",
    severity: Severity::Warn,
};

pub const DELEGATE_ON_STRUCT: Rule = Rule {
    id: "delegate-on-struct",
    title: "Delegate on struct instance caused a boxing allocation",
    message: "Struct instance method being used for delegate creation, this will result in a boxing instruction",
    severity: Severity::Warn,
};

pub const METHOD_GROUP: Rule = Rule {
    id: "method-group",
    title: "Delegate allocation from a method group",
    message: "This will allocate a delegate instance",
    severity: Severity::Warn,
};

pub const READONLY_METHOD_GROUP: Rule = Rule {
    id: "readonly-method-group",
    title: "Delegate allocation from a method group assigned once to a readonly slot",
    message: "This will allocate a delegate instance, but only once per containing type",
    severity: Severity::Warn,
};

/// Every rule the engine can emit, for hosts that enumerate or look up
/// the catalogue.
pub const CATALOGUE: &[Rule] = &[
    STRING_CONCATENATION,
    BOXING_IN_CONCATENATION,
    CLOSURE_CAPTURE,
    CLOSURE_SOURCE,
    GENERIC_METHOD_DELEGATE,
    REFERENCE_ENUMERATOR,
    NEW_ARRAY,
    NEW_OBJECT,
    NEW_ANONYMOUS_OBJECT,
    IMPLICIT_ARRAY,
    INITIALIZER,
    LET_CLAUSE,
    BOXING,
    DELEGATE_ON_STRUCT,
    METHOD_GROUP,
    READONLY_METHOD_GROUP,
];

/// Look a rule up by its stable identifier.
pub fn find(id: &str) -> Option<&'static Rule> {
    CATALOGUE.iter().find(|r| r.id == id)
}
