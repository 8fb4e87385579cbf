//! Tracer tests.

mod helpers;
