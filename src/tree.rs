//! Single node octrees over three dimensional point data.
pub mod constants;
pub mod helpers;
pub mod single_node;
pub mod types;
