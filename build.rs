//! Build script for Festiby.
//!
//! Copies the `.env.example` configuration template to the user's local data
//! directory, next to where `festiby` looks for its `.env` file:
//! - Linux: `~/.local/share/festiby/.env.example`
//! - macOS: `~/Library/Application Support/festiby/.env.example`
//! - Windows: `%LOCALAPPDATA%/festiby/.env.example`

use std::{env, fs, path::PathBuf};

/// Copies the template, warning instead of failing when it is missing.
///
/// # Errors
///
/// Fails when `CARGO_MANIFEST_DIR` is unset or the data directory cannot be
/// created or written to.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("festiby");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        fs::copy(&env_example_path, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
