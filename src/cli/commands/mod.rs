pub mod config;
pub mod generate;
pub mod render;
pub mod tree;
