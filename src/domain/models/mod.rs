pub mod activity;
pub mod auth;
pub mod booking;
pub mod event;
pub mod session;
pub mod user;
