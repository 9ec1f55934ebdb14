//! Types shared between the search client core and its front-ends.

pub mod domain;
pub mod error;
