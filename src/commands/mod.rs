//! Command implementations for Stagehand CLI

pub mod build;
pub mod completions;
pub mod inspect;
pub mod run;
pub mod verify;
pub mod version;
