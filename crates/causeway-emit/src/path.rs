//! Output path derivation.
//!
//! One unit per type, placed under the lower-cased, slash-joined namespace
//! with a fixed "generated" marker in the file name.

use std::path::{Path, PathBuf};

/// File extension of emitted host source.
pub const HOST_EXTENSION: &str = "cs";

/// File name of one generated unit (`<Name>.generated.cs`).
pub fn unit_file_name(type_name: &str) -> String {
    format!("{type_name}.generated.{HOST_EXTENSION}")
}

/// Full output path of one generated unit.
pub fn unit_path(out_dir: &Path, namespace: &str, type_name: &str) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    for segment in namespace.split('.').filter(|s| !s.is_empty()) {
        path.push(segment.to_lowercase());
    }
    path.push(unit_file_name(type_name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_segments_are_lowered_and_joined() {
        let path = unit_path(Path::new("out"), "Com.Example.Zoo", "Animal");
        assert_eq!(
            path,
            Path::new("out")
                .join("com")
                .join("example")
                .join("zoo")
                .join("Animal.generated.cs")
        );
    }

    #[test]
    fn empty_namespace_stays_flat() {
        let path = unit_path(Path::new("out"), "", "Animal");
        assert_eq!(path, Path::new("out").join("Animal.generated.cs"));
    }
}
