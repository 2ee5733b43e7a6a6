//! Version information for Vitrine, taken from Cargo.toml at build time.

/// The version of Vitrine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the application
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Get the full version string, as shown in the viewer's title bar
pub fn full_version() -> String {
    format!("{} v{}", APP_NAME, VERSION)
}
