pub mod activity;
pub mod auth_service;
pub mod ledger;
pub mod stats;
