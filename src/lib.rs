// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lists;
pub mod parser;
pub mod problem;
pub mod runtime;
pub mod solved;
pub mod store;
pub mod ui;
pub mod view;
