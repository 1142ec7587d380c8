pub mod activity;
pub mod analysis;
pub mod audience;
pub mod charts;
pub mod cli;
pub mod config;
pub mod creative;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod platform;
pub mod report;
pub mod store;
pub mod tasks;
pub mod theme;
pub mod upload;
pub mod web;
pub mod wizard;
