// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! A table-backed [`SemanticOracle`] for hosts that precompute their
//! semantic facts up front (and for the test harness, which scripts
//! them). All tables are filled before analysis starts; reads during
//! analysis never mutate, so sharing across classifier invocations is
//! safe.

use crate::semantics::{
    CaptureSet, ConstValue, ConversionKind, SemanticOracle, SymbolFacts, TypeFacts,
};
use crate::syntax::NodeId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct FactOracle {
    expression_types: HashMap<NodeId, TypeFacts>,
    converted_types: HashMap<NodeId, TypeFacts>,
    conversions: HashMap<NodeId, ConversionKind>,
    symbols: HashMap<NodeId, SymbolFacts>,
    constants: HashMap<NodeId, ConstValue>,
    captures: HashMap<NodeId, CaptureSet>,
}

impl FactOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_expression_type(&mut self, node: NodeId, facts: TypeFacts) -> &mut Self {
        self.expression_types.insert(node, facts);
        self
    }

    pub fn set_converted_type(&mut self, node: NodeId, facts: TypeFacts) -> &mut Self {
        self.converted_types.insert(node, facts);
        self
    }

    pub fn set_conversion(&mut self, node: NodeId, conversion: ConversionKind) -> &mut Self {
        self.conversions.insert(node, conversion);
        self
    }

    pub fn set_symbol(&mut self, node: NodeId, facts: SymbolFacts) -> &mut Self {
        self.symbols.insert(node, facts);
        self
    }

    pub fn set_constant(&mut self, node: NodeId, value: ConstValue) -> &mut Self {
        self.constants.insert(node, value);
        self
    }

    pub fn set_captures(&mut self, node: NodeId, captures: CaptureSet) -> &mut Self {
        self.captures.insert(node, captures);
        self
    }
}

impl SemanticOracle for FactOracle {
    fn expression_type(&self, node: NodeId) -> Option<&TypeFacts> {
        self.expression_types.get(&node)
    }

    fn converted_type(&self, node: NodeId) -> Option<&TypeFacts> {
        self.converted_types.get(&node)
    }

    fn conversion_at(&self, node: NodeId) -> ConversionKind {
        self.conversions.get(&node).copied().unwrap_or_default()
    }

    fn resolved_symbol(&self, node: NodeId) -> Option<&SymbolFacts> {
        self.symbols.get(&node)
    }

    fn constant_value(&self, node: NodeId) -> Option<&ConstValue> {
        self.constants.get(&node)
    }

    fn captures(&self, node: NodeId) -> Option<&CaptureSet> {
        self.captures.get(&node)
    }
}
