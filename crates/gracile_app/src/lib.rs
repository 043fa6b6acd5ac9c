//! Gracile app: headless subscription page driven from the command line.
pub mod platform;
