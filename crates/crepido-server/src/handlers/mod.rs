//! HTTP request handlers.

pub(crate) mod boards;
