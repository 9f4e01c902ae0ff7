pub mod app;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod evasion;
pub mod event_loop;
pub mod geometry;
pub mod haptics;
pub mod input_mode;
pub mod logging;
pub mod modals;
pub mod pages;
pub mod parallax;
pub mod particles;
pub mod runner;
pub mod theme;
pub mod timers;
pub mod ui;
