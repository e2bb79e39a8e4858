//! Build script for bioauth-biometric.
//!
//! Apple targets compile the `LocalAuthentication` helper and its swift-bridge
//! glue. Other targets need no generated code.

use bioauth_build::{AppleSwiftConfig, compile_swift, targets_apple};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if targets_apple() {
        compile_swift(
            "src/sys/apple/mod.rs",
            &AppleSwiftConfig::new(env!("CARGO_PKG_NAME"), "BiometricHelper")
                .swift_source("src/sys/apple/BiometricHelper.swift")
                .framework("LocalAuthentication"),
        );
    }
}
