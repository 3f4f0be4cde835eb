pub mod pointer;
pub mod viewport;

pub use pointer::{wire_pointer_handlers, PointerWiring};
pub use viewport::{wire_viewport_handlers, ViewportWiring};
