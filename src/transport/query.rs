//! Query-string building from typed parameter structs.

use crate::error::Result;
use serde::Serialize;

/// Append a serialized query string to `path`.
///
/// Parameter structs mark empty fields with `skip_serializing_if`, so unset
/// options never appear on the wire. A params struct that serializes to
/// nothing leaves the path untouched.
pub(crate) fn path_with_query<P: Serialize + ?Sized>(path: &str, params: &P) -> Result<String> {
    let query = serde_urlencoded::to_string(params)?;
    if query.is_empty() {
        return Ok(path.to_owned());
    }
    Ok(format!("{path}?{query}"))
}
