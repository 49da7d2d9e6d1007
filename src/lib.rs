pub mod app;
pub mod config;
pub mod draft;
pub mod logging;
pub mod remote;
pub mod ui;
pub mod validate;
