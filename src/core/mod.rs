//! Core modules for the carnet catalog: the recipe store, the query
//! engine, and the shared primitives they sit on.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod mirror;
pub mod model;
pub mod output;
pub mod query;
pub mod seed;
pub mod store;
pub mod time;
