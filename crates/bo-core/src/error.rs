use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unhandled {what} index {index}")]
    UnhandledIndex { what: &'static str, index: usize },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
