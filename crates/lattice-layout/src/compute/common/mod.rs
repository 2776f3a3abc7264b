//! Helpers shared between the container algorithms.

pub(crate) mod alignment;
