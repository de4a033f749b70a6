//! Writing side of the compiler: the output schema, the fixed rule catalog,
//! assembly, and persistence.

pub mod assemble;
pub mod model;
pub mod rules;
pub mod writer;

pub use assemble::{SourceInfo, assemble};
pub use model::Constitution;
pub use writer::{Emitted, Format, WriteMode};
