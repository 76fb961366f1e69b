//! Integration test suite modules

mod editing;
mod file_session;
mod ordering;
