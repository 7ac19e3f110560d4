//! Part model for multipart bodies.

/// One named section of a `multipart/form-data` body.
///
/// Either a plain form field carrying a string value, or a file
/// attachment carrying a MIME type, an optional filename, and raw
/// bytes. Parts are immutable once constructed.
///
/// No validation is performed on construction: empty names and MIME
/// types are accepted silently, and `"` characters inside `name`,
/// `filename`, or `mime_type` are embedded verbatim into the framing.
/// Callers must keep those fields free of quote characters or accept
/// corrupted framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A plain form field with a string value.
    Form {
        /// Form field name.
        name: String,
        /// Form field value, embedded as its UTF-8 bytes.
        value: String,
    },
    /// A file attachment.
    File {
        /// Form field name.
        name: String,
        /// MIME type of the content (e.g. `image/png`).
        mime_type: String,
        /// Filename; serialized as `filename=""` when absent.
        filename: Option<String>,
        /// Raw file content, embedded verbatim with no transfer encoding.
        data: Vec<u8>,
    },
}

impl Part {
    /// Creates a form field part with the supplied name and value.
    pub fn form(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Form {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a file part with the supplied name, MIME type, optional
    /// filename, and content.
    ///
    /// The part takes ownership of `data`; no further mutation is
    /// expected after construction.
    pub fn file(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        filename: Option<&str>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self::File {
            name: name.into(),
            mime_type: mime_type.into(),
            filename: filename.map(ToString::to_string),
            data: data.into(),
        }
    }

    /// Form field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Form { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// MIME type of the part; empty for form fields.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Form { .. } => "",
            Self::File { mime_type, .. } => mime_type,
        }
    }

    /// Filename for file parts; `None` for form fields.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Form { .. } => None,
            Self::File { filename, .. } => filename.as_deref(),
        }
    }

    /// Raw payload bytes.
    ///
    /// For form fields this is the UTF-8 encoding of the value; for
    /// file parts the content is returned unchanged (borrowed, no copy).
    #[must_use]
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Form { value, .. } => value.as_bytes(),
            Self::File { data, .. } => data,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_form_part_accessors() {
        let part = Part::form("field1", "value1");
        assert_eq!(part.name(), "field1");
        assert_eq!(part.mime_type(), "");
        assert_eq!(part.filename(), None);
        assert_eq!(part.data(), b"value1");
    }

    #[test]
    fn test_file_part_accessors() {
        let part = Part::file("file1", "text/plain", Some("a.txt"), b"hi".to_vec());
        assert_eq!(part.name(), "file1");
        assert_eq!(part.mime_type(), "text/plain");
        assert_eq!(part.filename(), Some("a.txt"));
        assert_eq!(part.data(), b"hi");
    }

    #[test]
    fn test_file_part_without_filename() {
        let part = Part::file("file1", "application/octet-stream", None, vec![0u8, 255]);
        assert_eq!(part.filename(), None);
        assert_eq!(part.data(), &[0u8, 255]);
    }

    #[test]
    fn test_form_part_value_bytes_are_utf8() {
        let part = Part::form("greeting", "héllo");
        assert_eq!(part.data(), "héllo".as_bytes());
    }

    #[test]
    fn test_empty_name_accepted_silently() {
        // Construction performs no validation; well-formed use is the
        // caller's responsibility.
        let part = Part::form("", "value");
        assert_eq!(part.name(), "");
    }

    #[test]
    fn test_file_part_data_unmodified() {
        let payload: Vec<u8> = (0..=255).collect();
        let part = Part::file("blob", "application/octet-stream", None, payload.clone());
        assert_eq!(part.data(), payload.as_slice());
    }
}
