//! Handle tests against a recording in-memory host.
//!
//! Each test builds a [`common::FakeHost`], drives the public handles and
//! asserts on the exact host calls and payloads they produced.

mod export;
mod sheet;
mod table;
mod values;

pub use common::*;
