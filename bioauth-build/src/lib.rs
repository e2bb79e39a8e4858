//! Build-script helpers for bioauth crates.
//!
//! Generates the swift-bridge glue for a bridge module, compiles the crate's
//! Swift sources against it and links the result together with the required
//! Apple frameworks.
//!
//! ```ignore
//! use bioauth_build::{AppleSwiftConfig, compile_swift};
//!
//! fn main() {
//!     if bioauth_build::targets_apple() {
//!         compile_swift(
//!             "src/sys/apple/mod.rs",
//!             &AppleSwiftConfig::new(env!("CARGO_PKG_NAME"), "BiometricHelper")
//!                 .swift_source("src/sys/apple/BiometricHelper.swift")
//!                 .framework("LocalAuthentication"),
//!         );
//!     }
//! }
//! ```

#![warn(missing_docs)]

mod apple;

pub use apple::{AppleSwiftConfig, compile_swift, targets_apple};
