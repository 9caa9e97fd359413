// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

/// The closed set of node kinds the engine understands.
///
/// Classifiers declare interest as slices of these kinds and the
/// dispatcher routes on them, so adding a kind is a deliberate,
/// exhaustiveness-checked change rather than a stringly-typed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    Block,
    MethodDeclaration,
    LocalFunctionStatement,
    FieldDeclaration,
    PropertyDeclaration,
    LocalDeclaration,
    VariableDeclarator,
    EqualsValueClause,
    ArrowExpressionClause,

    ArgumentList,
    Argument,
    ReturnStatement,
    YieldReturnStatement,
    ForStatement,
    ForEachStatement,

    CoalesceExpression,
    AsExpression,
    ConditionalExpression,
    CastExpression,
    Interpolation,
    AddExpression,
    AddAssignmentExpression,
    SimpleAssignment,

    SimpleLambda,
    ParenthesizedLambda,
    AnonymousMethod,
    InvocationExpression,

    ObjectCreation,
    AnonymousObjectCreation,
    ArrayCreation,
    ImplicitArrayCreation,
    ObjectInitializer,
    ArrayInitializer,
    CollectionInitializer,
    LetClause,

    IdentifierName,
    MemberAccess,
    Literal,
}

impl SyntaxKind {
    /// Binary shapes the concatenation classifier treats as chain links.
    pub fn is_concatenation_link(&self) -> bool {
        matches!(
            self,
            SyntaxKind::AddExpression | SyntaxKind::AddAssignmentExpression
        )
    }

    /// Expression shapes that can denote a bare method reference.
    pub fn is_method_reference_shape(&self) -> bool {
        matches!(self, SyntaxKind::IdentifierName | SyntaxKind::MemberAccess)
    }
}
