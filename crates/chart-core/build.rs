// File: crates/chart-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Checked on the target, not the host, so cross builds link correctly.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // Registry lookups (RegOpenKeyExW and friends).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
