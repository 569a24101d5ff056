//! Unit tests for the task bounded context.

mod serialization_tests;
