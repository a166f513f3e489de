mod common;
mod context_tests;
mod scenario_tests;
