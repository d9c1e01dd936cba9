//! State types owned by one console session.

mod edit;
mod run;
mod status;

pub use edit::*;
pub use run::*;
pub use status::*;
