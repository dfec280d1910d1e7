// ABOUTME: Checks that every Rust source file in the workspace carries the standard file header
// ABOUTME: Two ABOUTME lines followed by the SPDX license identifier and copyright notice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

const SPDX_LINE: &str = "// SPDX-License-Identifier: MIT OR Apache-2.0";
const COPYRIGHT_LINE: &str = "// Copyright (c) 2025 Pierre Fitness Intelligence";

fn collect_rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == "target") {
                continue;
            }
            collect_rust_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

#[test]
fn test_every_source_file_has_license_header() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let mut files = Vec::new();
    for dir in ["src", "tests", "crates"] {
        collect_rust_files(&root.join(dir), &mut files);
    }
    assert!(!files.is_empty());

    let missing: Vec<String> = files
        .iter()
        .filter(|path| {
            let text = fs::read_to_string(path).unwrap();
            let head: Vec<&str> = text.lines().take(5).collect();
            !(head.len() == 5
                && head[0].starts_with("// ABOUTME:")
                && head[1].starts_with("// ABOUTME:")
                && head[3] == SPDX_LINE
                && head[4] == COPYRIGHT_LINE)
        })
        .map(|path| path.strip_prefix(root).unwrap_or(path).display().to_string())
        .collect();

    assert!(missing.is_empty(), "files without the standard header: {missing:?}");
}
