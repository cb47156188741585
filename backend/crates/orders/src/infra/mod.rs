//! Orders Infrastructure Layer

pub mod postgres;
