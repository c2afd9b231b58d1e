pub mod categories;
pub mod config;
pub mod demo_roster;
pub mod export;
pub mod filter;
pub mod persist;
pub mod roster;
pub mod similar;
pub mod state;
