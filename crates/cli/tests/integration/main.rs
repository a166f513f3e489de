mod check_tests;
mod common;
mod resolve_tests;
