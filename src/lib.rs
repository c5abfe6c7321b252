pub mod api;
pub mod config;
pub mod gtfs_realtime;
pub mod models;
pub mod web;
