pub mod ast;
pub mod builder;
pub mod gene_consumer;
pub mod genome;
pub mod semantic_mapper;
pub mod validator;

pub use ast::{ConstantNode, Node, NodeParams, OperatorNode, VariableNode};
pub use builder::TreeBuilder;
pub use genome::{random_genome, Genome};
pub use semantic_mapper::SemanticMapper;
pub use validator::{TreeStats, TreeValidator};
