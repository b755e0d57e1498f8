//! Closure and composition behavior.

mod function_tests;
