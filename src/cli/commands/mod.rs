pub mod plan;
pub mod run;

pub use plan::*;
pub use run::*;
