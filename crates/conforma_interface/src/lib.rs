//! Trait definitions for the Conforma structured generation library.
//!
//! These are the seams between the engine and its collaborators: the
//! generation client boundary, the schema descriptor contract, and the
//! cooperative cancellation token checked between attempts.

mod cancel;
mod completion;
mod schema;

pub use cancel::{Cancellable, CancellationToken};
pub use completion::TextCompletion;
pub use schema::{BatchSchema, SchemaDescriptor};
