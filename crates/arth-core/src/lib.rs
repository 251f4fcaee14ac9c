//! Arth core library
//!
//! Domain types and the AI pipeline for the Arth personal finance dashboard:
//!
//! - `profile`: the user's financial profile (wire-compatible with the
//!   stored onboarding record)
//! - `insight`: AI-generated insight cards and the fixed fallback set
//! - `prompt`: renders the analysis prompt sent to the AI backend
//! - `ai`: pluggable AI backend (Gemini, mock) with response cleanup/parsing
//! - `error`: library error types

pub mod ai;
pub mod error;
pub mod insight;
pub mod profile;
pub mod prompt;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use insight::{fallback_insights, Impact, Insight, InsightCategory, InsightType};
pub use profile::{ContributionMode, Profile, RiskProfile};
