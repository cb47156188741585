//! Orders Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;
