//! Enforcement engine for saga marker contracts.
//!
//! Validates every class declaration in a type graph and produces diagnostics:
//! - RULE-SAGA-CLASS: type with step markers lacks the saga capability
//! - RULE-MSG-TYPE: step message type lacks the message capability
//! - RULE-RETRY-ON: retry-on exception does not derive from the failure base
//! - RULE-NON-RETRYABLE: non-retryable exception does not derive from the failure base
//! - RULE-MULTI-PIVOT: more than one step is flagged as the pivot

pub mod engine;
pub mod fix_generator;
pub mod location;
pub mod pivot;
pub mod rules;
pub mod suppress;
pub mod types;
pub mod violations;

pub use engine::{validate, CancellationToken, ValidationEngine};
