//! Candidate selection and pruning utilities.
//!
//! Includes Top-K collection and spatial non-maximum suppression.

pub(crate) mod nms;
pub(crate) mod topk;
