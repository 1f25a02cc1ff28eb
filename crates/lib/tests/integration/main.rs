mod common;

mod cleanup_tests;
mod configure_tests;
