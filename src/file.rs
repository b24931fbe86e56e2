//! Receipt files selected by the user, the rules for accepting them and the
//! multipart payload they are uploaded in.

/// The message shown under the file input when a file is rejected.
pub const FILE_FORMAT_ERROR_MESSAGE: &str = "Le document doit être au format jpg ou png.";

/// A file picked from the file input.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    /// The file name, including the extension.
    pub name: String,
    /// The MIME type reported by the file input, e.g. "image/jpeg".
    pub content_type: String,
    /// The file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Create a file from its name, MIME type and contents.
    pub fn new(name: &str, content_type: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_owned(),
            content_type: content_type.to_owned(),
            bytes: bytes.into(),
        }
    }
}

/// How a file name is matched against the accepted extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionMatch {
    /// The extension may appear anywhere in the file name.
    ///
    /// "archive.jpg.zip" is accepted under this mode.
    #[default]
    Substring,
    /// The file name must end with the extension.
    Suffix,
}

/// Decides which selected files may be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPolicy {
    /// Accepted extensions, lowercase and including the leading dot.
    pub accepted_extensions: Vec<String>,
    /// How file names are matched against `accepted_extensions`.
    pub matching: ExtensionMatch,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_extensions: [".jpg", ".jpeg", ".png"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            matching: ExtensionMatch::default(),
        }
    }
}

impl UploadPolicy {
    /// The default extensions with suffix matching.
    pub fn strict() -> Self {
        Self {
            matching: ExtensionMatch::Suffix,
            ..Self::default()
        }
    }

    /// Whether `file_name` has an accepted extension, ignoring case.
    pub fn accepts(&self, file_name: &str) -> bool {
        let file_name = file_name.to_lowercase();

        self.accepted_extensions
            .iter()
            .any(|extension| match self.matching {
                ExtensionMatch::Substring => file_name.contains(extension.as_str()),
                ExtensionMatch::Suffix => file_name.ends_with(extension.as_str()),
            })
    }
}

/// A single part of a [FormData] payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormDataValue {
    /// A plain text field.
    Text(String),
    /// A file field.
    File(SelectedFile),
}

/// An ordered multipart payload, as sent to [crate::stores::BillStore::create].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    parts: Vec<(String, FormDataValue)>,
}

impl FormData {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn append_text(&mut self, name: &str, value: &str) {
        self.parts
            .push((name.to_owned(), FormDataValue::Text(value.to_owned())));
    }

    /// Append a file field.
    pub fn append_file(&mut self, name: &str, file: SelectedFile) {
        self.parts.push((name.to_owned(), FormDataValue::File(file)));
    }

    /// The first text field called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(part_name, value)| match value {
            FormDataValue::Text(text) if part_name == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// The first file field called `name`.
    pub fn file(&self, name: &str) -> Option<&SelectedFile> {
        self.parts.iter().find_map(|(part_name, value)| match value {
            FormDataValue::File(file) if part_name == name => Some(file),
            _ => None,
        })
    }

    /// The number of parts in the payload.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the payload has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod upload_policy_tests {
    use super::{ExtensionMatch, UploadPolicy};

    #[test]
    fn accepts_image_extensions_in_any_case() {
        let policy = UploadPolicy::default();

        for name in [
            "receipt.jpg",
            "receipt.jpeg",
            "receipt.png",
            "RECEIPT.JPG",
            "Receipt.Png",
            "scan.JpEg",
        ] {
            assert!(policy.accepts(name), "want {name} to be accepted");
        }
    }

    #[test]
    fn rejects_names_without_image_extension() {
        let policy = UploadPolicy::default();

        for name in ["receipt.pdf", "receipt", "receipt.gif", "jpg", "png.txt.doc"] {
            assert!(!policy.accepts(name), "want {name} to be rejected");
        }
    }

    #[test]
    fn substring_match_accepts_extension_anywhere() {
        let policy = UploadPolicy::default();

        assert_eq!(policy.matching, ExtensionMatch::Substring);
        assert!(policy.accepts("archive.jpg.zip"));
        assert!(policy.accepts("jpg.pdf.png"));
    }

    #[test]
    fn suffix_match_rejects_extension_in_the_middle() {
        let policy = UploadPolicy::strict();

        assert!(!policy.accepts("archive.jpg.zip"));
        assert!(policy.accepts("archive.zip.jpg"));
    }
}
