pub mod lifecycle;
pub mod pointer;

pub use lifecycle::{wire_page_lifecycle, PageLifecycle};
pub use pointer::{wire_input_handlers, InputWiring};
