//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so it can be served with an immutable cache
//! header: `static/css/main.css` is copied to
//! `static/css/derived/main.<hash>.css` and the hash is exposed to the crate
//! as `CSS_HASH`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"));
    fingerprint_stylesheet(&manifest_dir.join("static/css"));
}

fn fingerprint_stylesheet(css_dir: &Path) {
    let source = css_dir.join("main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", source.display());
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let hash = short_hash(&content);
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived_dir = css_dir.join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");

    // Stale fingerprints from earlier builds would otherwise pile up
    if let Ok(entries) = fs::read_dir(&derived_dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with("main.") && name != format!("main.{hash}.css") {
                let _ = fs::remove_file(entry.path());
            }
        }
    }

    fs::write(derived_dir.join(format!("main.{hash}.css")), &content)
        .expect("Failed to write fingerprinted CSS");
}

/// First [`HASH_LEN`] hex characters of the SHA-256 of `content`.
fn short_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hex = format!("{digest:x}");
    hex.truncate(HASH_LEN);
    hex
}
