pub mod config;
pub mod day;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod summary;
pub mod tier;
pub mod window;
