//! Study flow: compose a session, grade answers, record the result

mod service;

pub use service::{SessionStart, StudyService};
