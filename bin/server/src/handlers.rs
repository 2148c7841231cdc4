//! HTTP request handlers

pub mod create;
pub mod create_form;
pub mod error;
pub mod health;
pub mod inspections;
