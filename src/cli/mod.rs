pub mod app;
pub mod click;
pub mod commands;
pub mod context;
pub mod env;
pub mod output;
pub mod probe;
pub mod runtime;
pub mod scan;
