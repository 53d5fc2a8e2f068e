pub mod flash;
pub mod form;
pub mod middleware;
pub mod services;
pub mod views;
