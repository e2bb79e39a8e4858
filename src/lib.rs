//! # Bioauth
//!
//! Ask the host whether biometric authentication (Face ID, Touch ID, Optic ID,
//! Windows Hello or an `fprintd` fingerprint reader) is usable, run a single
//! challenge against it and surface the result to a presentation layer.
//!
//! ## Features
//!
//! - `biometric` (default): capability probing, authentication and the
//!   `AuthViewModel` presentation state.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! bioauth = "0.1"
//! ```
//!
//! ```rust,no_run
//! use bioauth::biometric;
//!
//! async fn unlock() {
//!     match biometric::authenticate("Unlock your notes").await {
//!         Ok(modality) => println!("Authenticated with {modality}"),
//!         Err(err) => println!("{err}"),
//!     }
//! }
//! ```

#[cfg(feature = "biometric")]
pub use bioauth_biometric as biometric;
