pub mod gallery;
pub mod pointer;

pub use gallery::wire_gallery_handlers;
pub use pointer::{wire_input_handlers, InputWiring};
