//! Unit tests for the sprint bounded context.
