//! Test Module
//!
//! Cross-module suites for the SimCoach core.
//!
//! ## Test Categories
//! - `evaluator_tests`: Score bounds and scorer contracts over shared fixtures
//! - `session_tests`: Status truth table, transitions and ownership
//! - `simulator_tests`: End-to-end message, upload and integrity flows with mock responders
//! - `config_tests`: Environment and dotenv loading

pub mod simulator_tests;
