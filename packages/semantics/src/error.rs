use propscan_parser::ParseError;
use thiserror::Error;

/// Error raised while turning a source file into a unit
#[derive(Error, Debug)]
pub enum SemanticError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
