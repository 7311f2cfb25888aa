use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use utoipa::ToSchema;

/// Bytes left as-is in a URL path segment; everything else is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Placeholder shown for images no doctor has commented on.
pub const NO_FEEDBACK: &str = "No feedback yet.";

/// A stored image paired with its feedback, as listed for students.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct ImageFeedback {
    pub filename: String,
    pub feedback: String,
}

/// A stored image with the URL it is served from, as listed for doctors.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct ImageLink {
    pub filename: String,
    pub url: String,
}

impl ImageLink {
    pub fn for_file(filename: &str) -> Self {
        ImageLink {
            filename: filename.to_string(),
            url: format!("/uploads/{}", path_segment(filename)),
        }
    }
}

/// Percent-encodes `filename` for use as a single path segment, so names
/// holding `?`, `#`, `/` or `%` route back to the same file.
pub fn path_segment(filename: &str) -> String {
    utf8_percent_encode(filename, PATH_SEGMENT).to_string()
}
