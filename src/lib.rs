pub mod database;
pub mod geo;
pub mod models;
pub mod services;
pub mod session;
pub mod web;
