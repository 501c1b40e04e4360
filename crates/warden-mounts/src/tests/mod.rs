//! Unit tests for mount translation, the confined view, registration,
//! and the ingestion boundary.

mod support;
