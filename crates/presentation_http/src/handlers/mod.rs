//! HTTP request handlers

pub mod climate;
pub mod health;
pub mod home;
