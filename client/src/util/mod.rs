//! Helpers shared by components.

pub mod action;
