/// A file picked by the user, reduced to what validation and upload need.
///
/// `handle` is whatever the platform uses to read the content later: a `web_sys::File`
/// in the browser, a path on the command line. The session never reads it itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<H> {
    /// Original file name, preserved in the multipart part.
    pub name: String,
    /// Media type as reported by the platform. May be empty when unknown.
    pub media_type: String,
    /// Size in bytes.
    pub size: u64,
    pub handle: H,
}

impl<H> SelectedFile<H> {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64, handle: H) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            handle,
        }
    }
}
