pub mod app;
pub mod config;
pub mod events;
pub mod slider;
pub mod sys;
