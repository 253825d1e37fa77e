//! Mini-log article/feed/user service and a todo CRUD service over an
//! injectable entity store.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
