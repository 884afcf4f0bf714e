//! Language hints derived from file names.
//!
//! The hint only feeds syntax highlighting in presentation layers; the diff
//! never looks at it.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

static EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("java", "java"),
        ("js", "javascript"),
        ("jsx", "javascript"),
        ("mjs", "javascript"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("py", "python"),
        ("cs", "csharp"),
        ("vb", "vbnet"),
        ("cbl", "cobol"),
        ("cob", "cobol"),
        ("cobol", "cobol"),
        ("cpy", "cobol"),
        ("f", "fortran"),
        ("f77", "fortran"),
        ("f90", "fortran"),
        ("pas", "pascal"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("hpp", "cpp"),
        ("go", "go"),
        ("rs", "rust"),
        ("rb", "ruby"),
        ("php", "php"),
        ("pl", "perl"),
        ("sql", "sql"),
        ("sh", "shell"),
        ("xml", "xml"),
        ("json", "json"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("toml", "toml"),
    ])
});

/// Detects a language from the extension of `file_name`, case-insensitively.
pub fn detect_language(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    EXTENSIONS.get(ext.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("src/Main.java"), Some("java"));
        assert_eq!(detect_language("PAYROLL.CBL"), Some("cobol"));
        assert_eq!(detect_language("app/view.tsx"), Some("typescript"));
        assert_eq!(detect_language("README"), None);
        assert_eq!(detect_language("notes.unknownext"), None);
    }
}
