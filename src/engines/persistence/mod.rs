pub mod parser;
pub mod record;

pub use parser::{parse, Parser};
pub use record::{serialize, NodeRecord};
