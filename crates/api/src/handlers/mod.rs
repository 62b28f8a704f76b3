//! HTTP request handlers, one module per resource.

pub mod budget;
pub mod dashboard;
pub mod event;
pub mod member;
pub mod milestone;
pub mod resource;
pub mod shell;
pub mod task;
pub mod workspace;
