pub mod diagnostics;
pub mod webhook;
