pub mod contracts;
pub mod coordinator;
pub mod error;
pub mod refresh;
pub mod source;

pub use contracts::*;
pub use coordinator::*;
pub use error::*;
pub use refresh::*;
pub use source::*;
