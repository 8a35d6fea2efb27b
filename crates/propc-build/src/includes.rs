//! Quoted include directive scanning.

use std::collections::BTreeSet;

/// Collect the header base names a source text pulls in.
///
/// Only directives of the exact form `#include "name.h"`, anchored at the
/// start of a line, are recognized; angle-bracket includes and indented
/// directives are toolchain headers or malformed and are ignored. Text after
/// the closing quote is not inspected.
pub fn scan_includes(source: &str) -> BTreeSet<String> {
    let mut includes = BTreeSet::new();
    for line in source.lines() {
        if let Some(name) = match_include(line) {
            includes.insert(name.to_string());
        }
    }
    includes
}

/// Match one line against `#include "<word-chars>.h"` and return the base
/// name. Word chars are ASCII alphanumerics and underscore, at least one.
fn match_include(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#include \"")?;
    let stem_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if stem_len == 0 {
        return None;
    }
    if rest[stem_len..].starts_with(".h\"") {
        Some(&rest[..stem_len])
    } else {
        None
    }
}
