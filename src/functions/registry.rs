use crate::engines::generation::ast::{ConstantNode, Node, NodeParams, OperatorNode, VariableNode};
use crate::error::{Result, RuleEngineError};
use crate::functions::{
    constants::{self, builtin_constants},
    primitives::{
        Abs, Add, And, Average, Between, Bound, Divide, Equal, GreaterOrEqual, GreaterThan,
        IfThenElse, LessOrEqual, LessThan, Max, Min, Multiply, Negate, Not, Or, PriceAbove,
        Subtract,
    },
    traits::Primitive,
    variables::builtin_variables,
};
use crate::types::{is_acceptable, Arity, ScaleType, SemanticType};
use crate::utils::normalization::Normalization;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard};

/// What a spec instantiates
#[derive(Clone)]
pub enum SpecKind {
    /// `value: None` means the literal comes from the construction params
    Constant {
        value: Option<f64>,
        label: Option<String>,
    },
    /// `normalization` starts from the scale's default
    Variable {
        path: String,
        normalization: Normalization,
    },
    Operator { primitive: Arc<dyn Primitive> },
}

/// Read-only registry entry describing how to build one kind of node
#[derive(Clone)]
pub struct NodeSpec {
    identifier: String,
    description: String,
    output_type: SemanticType,
    kind: SpecKind,
}

impl NodeSpec {
    pub fn constant(
        identifier: &str,
        description: &str,
        output_type: SemanticType,
        value: f64,
        label: Option<&str>,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: description.to_string(),
            output_type,
            kind: SpecKind::Constant {
                value: Some(value),
                label: label.map(str::to_string),
            },
        }
    }

    pub fn parametric_constant(
        identifier: &str,
        description: &str,
        output_type: SemanticType,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: description.to_string(),
            output_type,
            kind: SpecKind::Constant {
                value: None,
                label: None,
            },
        }
    }

    pub fn variable(
        identifier: &str,
        path: &str,
        output_type: SemanticType,
        scale: ScaleType,
        description: &str,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: description.to_string(),
            output_type,
            kind: SpecKind::Variable {
                path: path.to_string(),
                normalization: Normalization::for_scale(scale),
            },
        }
    }

    pub fn operator(primitive: Arc<dyn Primitive>) -> Self {
        Self {
            identifier: primitive.alias().to_string(),
            description: primitive.ui_name().to_string(),
            output_type: primitive.output_type(),
            kind: SpecKind::Operator { primitive },
        }
    }

    /// Override the scale's default normalization. No effect on non-variables.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        if let SpecKind::Variable {
            normalization: ref mut n,
            ..
        } = self.kind
        {
            *n = normalization;
        }
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn output_type(&self) -> SemanticType {
        self.output_type
    }

    pub fn kind(&self) -> &SpecKind {
        &self.kind
    }

    pub fn is_operator(&self) -> bool {
        matches!(self.kind, SpecKind::Operator { .. })
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_operator()
    }

    /// Absent for constants and variables
    pub fn input_types(&self) -> Option<Vec<SemanticType>> {
        match &self.kind {
            SpecKind::Operator { primitive } => Some(primitive.input_types()),
            _ => None,
        }
    }

    pub fn arity(&self) -> Option<Arity> {
        match &self.kind {
            SpecKind::Operator { primitive } => Some(primitive.arity()),
            _ => None,
        }
    }

    /// Snapshot path of a variable spec
    pub fn path(&self) -> Option<&str> {
        match &self.kind {
            SpecKind::Variable { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self.kind, SpecKind::Constant { value: None, .. })
    }

    fn validate(&self) -> Result<()> {
        let valid_identifier = !self.identifier.is_empty()
            && self
                .identifier
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !valid_identifier {
            return Err(RuleEngineError::InvalidSpec(format!(
                "identifier {:?} must be uppercase ASCII, digits or underscores",
                self.identifier
            )));
        }
        if self.output_type.is_purpose() || self.output_type == SemanticType::Any {
            return Err(RuleEngineError::InvalidSpec(format!(
                "{} cannot produce {}",
                self.identifier, self.output_type
            )));
        }

        match &self.kind {
            SpecKind::Constant { value: Some(v), .. } => {
                check_literal(&self.identifier, self.output_type, *v)
                    .map_err(|e| RuleEngineError::InvalidSpec(e.to_string()))?;
            }
            SpecKind::Constant { value: None, .. } => {}
            SpecKind::Variable { path, .. } => {
                if path.is_empty() || path.split('.').any(str::is_empty) {
                    return Err(RuleEngineError::InvalidSpec(format!(
                        "{} has malformed path {:?}",
                        self.identifier, path
                    )));
                }
            }
            SpecKind::Operator { primitive } => {
                let inputs = primitive.input_types();
                let declared = match primitive.arity() {
                    Arity::Fixed(n) => n,
                    Arity::Variadic { .. } => 1,
                };
                if inputs.len() != declared {
                    return Err(RuleEngineError::InvalidSpec(format!(
                        "{} declares {} input types for arity {}",
                        self.identifier,
                        inputs.len(),
                        primitive.arity()
                    )));
                }
                if let Some(purpose) = inputs.iter().find(|t| t.is_purpose()) {
                    return Err(RuleEngineError::InvalidSpec(format!(
                        "{} cannot take {} as an operand",
                        self.identifier, purpose
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            SpecKind::Constant { .. } => "constant",
            SpecKind::Variable { .. } => "variable",
            SpecKind::Operator { .. } => "operator",
        };
        f.debug_struct("NodeSpec")
            .field("identifier", &self.identifier)
            .field("kind", &kind)
            .field("output_type", &self.output_type)
            .field("input_types", &self.input_types())
            .field("arity", &self.arity())
            .finish()
    }
}

fn check_literal(identifier: &str, output_type: SemanticType, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RuleEngineError::InvalidParameters {
            identifier: identifier.to_string(),
            reason: format!("literal {} is not finite", value),
        });
    }
    if output_type == SemanticType::Boolean && value != 0.0 && value != 1.0 {
        return Err(RuleEngineError::InvalidParameters {
            identifier: identifier.to_string(),
            reason: format!("boolean literal must be 0 or 1, got {}", value),
        });
    }
    Ok(())
}

/// Catalog of node specs keyed by uppercase identifier; the only way to build nodes.
pub struct NodeRegistry {
    specs: HashMap<String, NodeSpec>,
}

impl NodeRegistry {
    /// Empty registry, for callers assembling their own vocabulary
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_constants();
        registry.register_variables();
        registry.register_primitives();
        registry
    }

    /// Validate and add a spec. Identifiers are never replaced.
    pub fn register(&mut self, spec: NodeSpec) -> Result<()> {
        spec.validate()?;
        if self.specs.contains_key(spec.identifier()) {
            return Err(RuleEngineError::DuplicateNode {
                identifier: spec.identifier().to_string(),
            });
        }
        self.specs.insert(spec.identifier().to_string(), spec);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&NodeSpec> {
        self.specs.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.specs.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// All identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All specs, sorted by identifier
    pub fn specs(&self) -> Vec<&NodeSpec> {
        let mut specs: Vec<&NodeSpec> = self.specs.values().collect();
        specs.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        specs
    }

    /// Specs whose output may fill a slot expecting `expected`, sorted by identifier
    pub fn specs_producing(&self, expected: SemanticType) -> Vec<&NodeSpec> {
        self.specs()
            .into_iter()
            .filter(|s| is_acceptable(s.output_type, expected))
            .collect()
    }

    pub fn variables(&self) -> Vec<&NodeSpec> {
        self.specs()
            .into_iter()
            .filter(|s| matches!(s.kind, SpecKind::Variable { .. }))
            .collect()
    }

    pub fn create_node(&self, identifier: &str) -> Result<Node> {
        self.create_node_with(identifier, NodeParams::default())
    }

    /// Instantiate the spec registered under `identifier`.
    ///
    /// Operators come back empty and unsealed, ready for `attach`.
    pub fn create_node_with(&self, identifier: &str, params: NodeParams) -> Result<Node> {
        let spec = self
            .get(identifier)
            .ok_or_else(|| RuleEngineError::UnknownNode {
                identifier: identifier.to_string(),
            })?;

        match &spec.kind {
            SpecKind::Constant { value: Some(v), label } => {
                reject_params(identifier, params)?;
                Ok(Node::Constant(ConstantNode::new(
                    identifier,
                    *v,
                    spec.output_type,
                    label.clone(),
                    params,
                )))
            }
            SpecKind::Constant { value: None, .. } => {
                let value = params.value.ok_or_else(|| RuleEngineError::InvalidParameters {
                    identifier: identifier.to_string(),
                    reason: "a literal value is required".to_string(),
                })?;
                check_literal(identifier, spec.output_type, value)?;
                Ok(Node::Constant(ConstantNode::new(
                    identifier,
                    value,
                    spec.output_type,
                    None,
                    params,
                )))
            }
            SpecKind::Variable {
                path,
                normalization,
                ..
            } => {
                reject_params(identifier, params)?;
                Ok(Node::Variable(VariableNode::new(
                    identifier,
                    path,
                    spec.output_type,
                    &spec.description,
                    *normalization,
                )))
            }
            SpecKind::Operator { primitive } => {
                reject_params(identifier, params)?;
                Ok(Node::Operator(OperatorNode::new(identifier, Arc::clone(primitive))))
            }
        }
    }

    /// Numeric literal through the `CONSTANT` spec
    pub fn create_constant(&self, value: f64) -> Result<Node> {
        self.create_node_with(constants::CONSTANT, NodeParams::value(value))
    }

    fn register_constants(&mut self) {
        for spec in builtin_constants() {
            self.specs.insert(spec.identifier().to_string(), spec);
        }
    }

    fn register_variables(&mut self) {
        for spec in builtin_variables() {
            self.specs.insert(spec.identifier().to_string(), spec);
        }
    }

    fn register_primitives(&mut self) {
        let primitives: Vec<Arc<dyn Primitive>> = vec![
            Arc::new(GreaterThan),
            Arc::new(LessThan),
            Arc::new(GreaterOrEqual),
            Arc::new(LessOrEqual),
            Arc::new(Equal),
            Arc::new(Between),
            Arc::new(PriceAbove),
            Arc::new(And),
            Arc::new(Or),
            Arc::new(Not),
            Arc::new(IfThenElse),
            Arc::new(Add),
            Arc::new(Subtract),
            Arc::new(Multiply),
            Arc::new(Divide),
            Arc::new(Negate),
            Arc::new(Abs),
            Arc::new(Min),
            Arc::new(Max),
            Arc::new(Average),
            Arc::new(Bound),
        ];
        for primitive in primitives {
            let spec = NodeSpec::operator(primitive);
            self.specs.insert(spec.identifier().to_string(), spec);
        }
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn reject_params(identifier: &str, params: NodeParams) -> Result<()> {
    if params.is_empty() {
        Ok(())
    } else {
        Err(RuleEngineError::InvalidParameters {
            identifier: identifier.to_string(),
            reason: "this node takes no construction parameters".to_string(),
        })
    }
}

// --- Process-wide registry ---
//
// Populated with the built-ins on first access. Later registrations go through
// the write lock, so they complete before any reader can observe them.

static GLOBAL: OnceLock<RwLock<NodeRegistry>> = OnceLock::new();

pub fn global() -> &'static RwLock<NodeRegistry> {
    GLOBAL.get_or_init(|| {
        let registry = NodeRegistry::with_builtins();
        log::debug!("Node registry initialised with {} specs", registry.len());
        RwLock::new(registry)
    })
}

/// Shared read access to the process-wide registry
pub fn read() -> RwLockReadGuard<'static, NodeRegistry> {
    global().read().unwrap_or_else(PoisonError::into_inner)
}

/// Extend the process-wide registry after startup
pub fn register_global(spec: NodeSpec) -> Result<()> {
    let identifier = spec.identifier().to_string();
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(spec)?;
    log::debug!("Registered node spec {}", identifier);
    Ok(())
}

pub fn create_node(identifier: &str) -> Result<Node> {
    read().create_node(identifier)
}

pub fn create_node_with(identifier: &str, params: NodeParams) -> Result<Node> {
    read().create_node_with(identifier, params)
}
