pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, StereoError};
pub use tolerance::Tolerance;
pub use traits::Validate;
