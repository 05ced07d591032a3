//! Leitner-box spaced repetition for vocabulary study
//!
//! Cards move between five boxes as they are graded; each box has a fixed
//! review interval. Sessions mix recently missed cards, due cards and unseen
//! cards, and progress tracks a daily study streak.

pub mod clock;
pub mod flashcards;
pub mod progress;
pub mod quiz;
pub mod storage;
pub mod study;
