//! Unit tests for the path operations and the canonicaliser.

mod support;
