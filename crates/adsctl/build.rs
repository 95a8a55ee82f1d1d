// Build script for adsctl - embeds version at compile time

fn main() {
    // Get version from environment (set by CI) or Cargo.toml
    let version =
        std::env::var("ADSCTL_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    // Embed as environment variable for runtime access
    println!("cargo:rustc-env=ADSCTL_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=ADSCTL_VERSION");
}
