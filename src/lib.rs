pub mod config;
pub mod history;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod warnings;
