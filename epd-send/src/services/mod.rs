pub mod fetch;
pub mod pipeline;
