use crate::error::Result;

/// Validate structural integrity or parameter preconditions of a value.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
