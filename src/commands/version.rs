//! Version command implementation

use gyoshu_install::error::Result;
use gyoshu_install::manifest::Manifest;

/// Run version command
pub fn run() -> Result<()> {
    let manifest = Manifest::embedded()?;

    println!("gyoshu {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Bundled assets: {}", manifest.version);
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());

    Ok(())
}

fn rustc_version() -> &'static str {
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
