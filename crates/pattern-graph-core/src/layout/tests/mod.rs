//! Layout engine tests.

mod helpers;
