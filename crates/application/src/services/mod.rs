pub mod iterative_resolver;
pub mod resolution_context;

pub use iterative_resolver::{IterativeResolver, Resolution};
pub use resolution_context::{ResolutionContext, ResolutionLimits};
