pub mod alert;
pub mod api;
pub mod config;
pub mod console;
pub mod debounce;
pub mod filter;
pub mod logger;
pub mod map;
pub mod models;
pub mod page;
