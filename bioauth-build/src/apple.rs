//! Apple platform build utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Configuration for Swift compilation.
#[derive(Debug, Clone)]
pub struct AppleSwiftConfig {
    /// The crate name the bridge is generated under (e.g. "bioauth-biometric").
    pub pkg_name: String,
    /// Swift source files, relative to the crate manifest.
    pub swift_sources: Vec<PathBuf>,
    /// Output library and Swift module name (e.g. "BiometricHelper").
    pub lib_name: String,
    /// Frameworks to link.
    pub frameworks: Vec<String>,
}

impl AppleSwiftConfig {
    /// Create a new config linking `Foundation`.
    #[must_use]
    pub fn new(pkg_name: impl Into<String>, lib_name: impl Into<String>) -> Self {
        Self {
            pkg_name: pkg_name.into(),
            swift_sources: Vec::new(),
            lib_name: lib_name.into(),
            frameworks: vec!["Foundation".to_string()],
        }
    }

    /// Add a Swift source file.
    #[must_use]
    pub fn swift_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.swift_sources.push(path.into());
        self
    }

    /// Add a framework to link.
    #[must_use]
    pub fn framework(mut self, name: impl Into<String>) -> Self {
        self.frameworks.push(name.into());
        self
    }
}

/// Whether the crate is being compiled for iOS or macOS.
///
/// Build scripts run on the host, so this reads the target from Cargo
/// instead of using `cfg`.
#[must_use]
pub fn targets_apple() -> bool {
    matches!(
        env::var("CARGO_CFG_TARGET_OS").as_deref(),
        Ok("ios" | "macos")
    )
}

fn env_path(key: &str) -> PathBuf {
    PathBuf::from(env::var(key).unwrap_or_else(|_| panic!("{key} is not set")))
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

fn xcrun(args: &[&str]) -> String {
    let output = Command::new("xcrun")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run xcrun {args:?}: {e}"));
    assert!(output.status.success(), "xcrun {args:?} failed");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn swift_target(target: &str) -> &'static str {
    if target.contains("ios") {
        if target.contains("sim") {
            "arm64-apple-ios14.0-simulator"
        } else {
            "arm64-apple-ios14.0"
        }
    } else if target.starts_with("aarch64") {
        "arm64-apple-macos11.0"
    } else {
        "x86_64-apple-macos11.0"
    }
}

/// Write the bridging header and a single Swift file holding the generated
/// glue followed by the crate's own sources. Returns both paths.
fn prepare_sources(out_dir: &Path, manifest_dir: &Path, config: &AppleSwiftConfig) -> (PathBuf, PathBuf) {
    let generated = out_dir.join(&config.pkg_name);

    let header = out_dir.join("Bridging-Header.h");
    fs::write(
        &header,
        format!(
            "#include \"{}\"\n#include \"{}\"\n",
            out_dir.join("SwiftBridgeCore.h").display(),
            generated.join(format!("{}.h", config.pkg_name)).display()
        ),
    )
    .expect("failed to write bridging header");

    let mut swift = read(&out_dir.join("SwiftBridgeCore.swift"));
    swift.push('\n');
    swift.push_str(&read(&generated.join(format!("{}.swift", config.pkg_name))));
    for source in &config.swift_sources {
        swift.push('\n');
        swift.push_str(&read(&manifest_dir.join(source)));
    }

    let combined = out_dir.join(format!("{}.swift", config.lib_name));
    fs::write(&combined, swift).expect("failed to write combined Swift source");

    (header, combined)
}

/// Generate the bridge for `bridge_rs`, compile the Swift sources in
/// `config` into a static library and link it with the listed frameworks.
///
/// # Panics
/// Panics when the Apple toolchain is missing or compilation fails, which
/// aborts the build script with the compiler output.
pub fn compile_swift(bridge_rs: &str, config: &AppleSwiftConfig) {
    let out_dir = env_path("OUT_DIR");
    let manifest_dir = env_path("CARGO_MANIFEST_DIR");
    let target = env::var("TARGET").expect("TARGET is not set");

    println!("cargo:rerun-if-changed={bridge_rs}");
    for source in &config.swift_sources {
        println!("cargo:rerun-if-changed={}", manifest_dir.join(source).display());
    }

    swift_bridge_build::parse_bridges(vec![bridge_rs])
        .write_all_concatenated(out_dir.clone(), &config.pkg_name);

    let (header, combined) = prepare_sources(&out_dir, &manifest_dir, config);

    let sdk = if target.contains("ios") {
        if target.contains("sim") { "iphonesimulator" } else { "iphoneos" }
    } else {
        "macosx"
    };
    let sdk_path = xcrun(&["--sdk", sdk, "--show-sdk-path"]);

    let object = out_dir.join(format!("{}.o", config.lib_name));
    let output = Command::new("swiftc")
        .arg("-emit-object")
        .arg("-parse-as-library")
        .arg("-module-name")
        .arg(&config.lib_name)
        .arg("-sdk")
        .arg(&sdk_path)
        .arg("-target")
        .arg(swift_target(&target))
        .arg("-import-objc-header")
        .arg(&header)
        .arg("-o")
        .arg(&object)
        .arg(&combined)
        .output()
        .expect("failed to run swiftc");
    assert!(
        output.status.success(),
        "swiftc failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let library = out_dir.join(format!("lib{}.a", config.lib_name));
    let status = Command::new("ar")
        .arg("rcs")
        .arg(&library)
        .arg(&object)
        .status()
        .expect("failed to run ar");
    assert!(status.success(), "ar failed");

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static={}", config.lib_name);

    // Swift runtime shipped next to the toolchain's swiftc.
    let swiftc = PathBuf::from(xcrun(&["--find", "swiftc"]));
    if let Some(toolchain) = swiftc.parent().and_then(Path::parent) {
        println!(
            "cargo:rustc-link-search=native={}",
            toolchain.join("lib/swift").join(sdk).display()
        );
    }
    println!("cargo:rustc-link-search=native=/usr/lib/swift");

    for framework in &config.frameworks {
        println!("cargo:rustc-link-lib=framework={framework}");
    }
}
