use serde::{Deserialize, Serialize};

/// Body of a 2xx answer from `POST /upload`.
///
/// The service answers `{ "downloadUrl": ... }` on success. Older deployments also
/// report processing failures with a 2xx status, `code != 0` and a `msg`, and no
/// `downloadUrl`, so those fields are read as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadResponse {
    pub fn success(download_url: impl Into<String>) -> Self {
        Self {
            download_url: Some(download_url.into()),
            ..Self::default()
        }
    }

    /// The generated document URL, or the server-provided failure text (if any).
    pub fn into_download_url(self) -> Result<String, Option<String>> {
        let accepted = self.code.is_none_or(|code| code == 0);
        match self.download_url {
            Some(url) if accepted && !url.trim().is_empty() => Ok(url),
            _ => Err(non_blank(self.message).or_else(|| non_blank(self.msg))),
        }
    }
}

/// Body of a non-2xx answer. Both fields are optional and blank text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        non_blank(self.message).or_else(|| non_blank(self.msg))
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
