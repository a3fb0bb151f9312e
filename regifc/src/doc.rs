//! Documentation-only modules.

pub mod example;
