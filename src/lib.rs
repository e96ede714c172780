pub mod suite;
pub mod paths;
pub mod tree;
pub mod group;
pub mod stats;
pub mod extract;
pub mod source;
pub mod render;
