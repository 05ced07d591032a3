//! Flashcard and spaced repetition system
//!
//! This module provides:
//! - Card, deck and session records
//! - Leitner box scheduling
//! - Study session composition

pub mod algorithm;
pub mod lenient;
pub mod models;
pub mod session;

pub use models::*;
