//! Build script for Focus Overlay
//!
//! Embeds the Windows application manifest for DPI awareness.

fn main() {
    println!("cargo:rerun-if-changed=resources/app.rc");
    println!("cargo:rerun-if-changed=resources/app.manifest");

    // Only run on Windows
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    // Embed Windows manifest for DPI awareness via .rc file
    if let Err(e) = embed_resource::compile("resources/app.rc", embed_resource::NONE).manifest_optional() {
        println!("cargo:warning=Manifest not embedded, DPI awareness falls back to the system default: {e}");
    }

    // Layered window attributes live in user32
    println!("cargo:rustc-link-lib=user32");
}
