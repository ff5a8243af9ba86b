//! Pluggable filename transformation applied when a file is attached.
//!
//! Used for collision avoidance or normalization before the target name is
//! fixed for the rest of the session.

/// Maps an original filename to the name the file will be stored under.
pub trait NameChanger {
    fn change_name(&self, original: &str) -> String;
}

/// Prepends a fixed prefix (namespacing, per-user buckets, dedup suffix
/// schemes built on top).
#[derive(Debug, Clone)]
pub struct PrefixNameChanger {
    prefix: String,
}

impl PrefixNameChanger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl NameChanger for PrefixNameChanger {
    fn change_name(&self, original: &str) -> String {
        format!("{}{}", self.prefix, original)
    }
}

/// Sanitizes a client-supplied filename for safe use on Linux filesystems
/// and in URL paths.
///
/// - Replaces NUL, `/`, `\`, whitespace, and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots, and underscores
/// - Caps length at 255 bytes (NAME_MAX)
/// - Falls back to `upload.bin` when nothing usable remains
#[derive(Debug, Clone, Default)]
pub struct SanitizingNameChanger;

/// Fallback when sanitization leaves nothing usable.
const DEFAULT_FILENAME: &str = "upload.bin";

const NAME_MAX: usize = 255;

impl SanitizingNameChanger {
    pub fn new() -> Self {
        Self
    }
}

impl NameChanger for SanitizingNameChanger {
    fn change_name(&self, original: &str) -> String {
        let mut out = String::with_capacity(original.len());
        let mut prev_underscore = false;

        for c in original.chars() {
            let replacement = if c == '\0'
                || c == '/'
                || c == '\\'
                || c == ' '
                || c == '\t'
                || c.is_control()
            {
                '_'
            } else {
                c
            };
            if replacement == '_' {
                if !prev_underscore {
                    out.push('_');
                }
                prev_underscore = true;
            } else {
                out.push(replacement);
                prev_underscore = false;
            }
        }

        let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

        let capped = if trimmed.len() > NAME_MAX {
            let mut take = NAME_MAX;
            while take > 0 && !trimmed.is_char_boundary(take) {
                take -= 1;
            }
            &trimmed[..take]
        } else {
            trimmed
        };

        if capped.is_empty() || capped == "." || capped == ".." {
            DEFAULT_FILENAME.to_string()
        } else {
            capped.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_prepended() {
        let changer = PrefixNameChanger::new("changed_");
        assert_eq!(changer.change_name("test.txt"), "changed_test.txt");
    }

    #[test]
    fn sanitize_replaces_separators_and_controls() {
        let changer = SanitizingNameChanger::new();
        assert_eq!(changer.change_name("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(changer.change_name("file\x00name.txt"), "file_name.txt");
        assert_eq!(changer.change_name("my report.pdf"), "my_report.pdf");
    }

    #[test]
    fn sanitize_collapses_and_trims() {
        let changer = SanitizingNameChanger::new();
        assert_eq!(changer.change_name("file___name.txt"), "file_name.txt");
        assert_eq!(changer.change_name("  ..  file.txt  ..  "), "file.txt");
    }

    #[test]
    fn sanitize_collapses_mixed_underscore_runs() {
        let changer = SanitizingNameChanger::new();
        assert_eq!(changer.change_name("a_/_b.txt"), "a_b.txt");
        assert_eq!(changer.change_name("a _ b.txt"), "a_b.txt");
    }

    #[test]
    fn sanitize_falls_back_on_unusable_names() {
        let changer = SanitizingNameChanger::new();
        assert_eq!(changer.change_name(""), "upload.bin");
        assert_eq!(changer.change_name("..."), "upload.bin");
        assert_eq!(changer.change_name("///"), "upload.bin");
    }

    #[test]
    fn sanitize_caps_length_at_name_max() {
        let changer = SanitizingNameChanger::new();
        let long = "x".repeat(300);
        assert_eq!(changer.change_name(&long).len(), 255);
    }
}
