//! Marker traits separating writes from reads
//!
//! Every mediator request implements exactly one of these. Commands change
//! stored state; queries only read it.

/// A request that modifies state
pub trait Command {}

/// A request that only reads state
pub trait Query {}
