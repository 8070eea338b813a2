//! Build script for refdocs
//!
//! Page templates are embedded with `include_str!`, so template edits
//! must trigger a rebuild.

fn main() {
    println!("cargo:rerun-if-changed=src/html/templates/");
    println!("cargo:rerun-if-changed=build.rs");
}
