pub mod clear;
pub mod decks;
pub mod due;
pub mod init;
pub mod progress;
pub mod settings;
pub mod study;
pub mod transfer;
