pub mod algorithms;
pub mod api;
pub mod array;
pub mod dims;
pub mod grid;
pub mod registry;
pub mod search;
