//! Build script for the site crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served under a
//! content-addressed name (`static/css/derived/main.{hash}.css`) and cached
//! forever. The hash is exposed to templates as `CSS_HASH`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 digest kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"),
    );
    let css_path = manifest_dir.join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        println!("cargo:warning=Could not read {}", css_path.display());
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };

    let hash = short_hash(&content);
    println!("cargo:rustc-env=CSS_HASH={hash}");

    copy_derived(&manifest_dir, &css_path, &hash);
}

fn short_hash(content: &[u8]) -> String {
    let digest = format!("{:x}", Sha256::digest(content));
    digest.chars().take(HASH_LEN).collect()
}

/// Copy the stylesheet to `static/css/derived/main.{hash}.css`.
fn copy_derived(manifest_dir: &Path, css_path: &Path, hash: &str) {
    let derived_dir = manifest_dir.join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");

    let derived_path = derived_dir.join(format!("main.{hash}.css"));
    if !derived_path.exists() {
        fs::copy(css_path, &derived_path).expect("Failed to copy CSS to derived directory");
    }
}
