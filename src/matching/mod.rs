//! Matching module containing scoring, similarity, and the reconciliation engine

pub mod core;
pub mod matcher;
pub mod score;
pub mod similarity;

pub use core::*;
pub use matcher::*;
pub use score::*;
pub use similarity::token_set_ratio;
