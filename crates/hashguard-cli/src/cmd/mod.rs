//! Command modules - one file per CLI action

pub mod copy;
pub mod list;
