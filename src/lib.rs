// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod config;
pub mod corpus;
pub mod round;
pub mod runtime;
pub mod scoring;
pub mod tier;
pub mod tint;
pub mod ui;
