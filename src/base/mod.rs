//! Base types and error handling.
//!
//! Provides foundational types shared by the resolver and the validator:
//! - [`NetError`](neterror::NetError): error codes in Chromium's `net_error_list.h` numbering
//! - [`IoResultExt`](context::IoResultExt): context helpers for IO results

pub mod context;
pub mod neterror;
