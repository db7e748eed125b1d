//! Generate `include/crossword.h` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let header = crate_dir.join("include").join("crossword.h");

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CROSSWORD_H")
        .with_cpp_compat(true)
        .generate();

    match generated {
        Ok(bindings) => {
            if let Some(dir) = header.parent() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    println!("cargo:warning=failed to create {}: {e}", dir.display());
                    return;
                }
            }
            bindings.write_to_file(&header);
        }
        Err(e) => println!("cargo:warning=failed to generate C header: {e}"),
    }
}
