use url::form_urlencoded;

use crate::ValidationError;

/// Appends `id` to `base` as a single, percent-encoded path segment.
///
/// Dot segments would be resolved away by URL parsing, so `.` and `..` are
/// rejected along with the empty id.
pub(crate) fn resource_path(base: &str, id: &str) -> Result<String, ValidationError> {
    match id {
        "" => Err(ValidationError::IdRequired),
        "." | ".." => Err(ValidationError::InvalidId),
        _ => Ok(format!("{base}/{}", urlencoding::encode(id))),
    }
}

/// Query string to append to a request path.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// In the case that `value` is positive, adds the key-value pair.
    pub(crate) fn add_if_positive(mut self, key: &'static str, value: u32) -> Self {
        if value > 0 {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// In the case that `value` isn't empty, adds the key-value pair.
    pub(crate) fn add_if_not_empty(mut self, key: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Appends the encoded query to `path`, leaving it untouched if there is
    /// nothing to add.
    pub(crate) fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();
        format!("{path}?{query}")
    }
}
