//! Core types for fsmaid state charts.
//!
//! This crate holds the pieces shared by the parser and the renderer:
//!
//! - [`grammar`] - the macro grammar ([`grammar::FSM_GRAMMAR`]) every
//!   extraction stage consumes: macro names, field counts and sentinels.
//! - [`record`] - the flat records read out of the source text.
//! - [`span`] - byte ranges pointing back into the source.

pub mod grammar;
pub mod record;
pub mod span;
