//! OData plumbing for the SharePoint REST API
//!
//! Server-relative paths are passed as parameter aliases
//! (`GetFileByServerRelativePath(decodedurl=@p)?@p='...'`) so they travel in
//! the query string, where the HTTP client percent-encodes them. Inside the
//! OData string literal a single quote is escaped by doubling it.

use serde::Deserialize;
use serde_json::Value;

/// `CheckOutType` value meaning the file is not checked out
pub const CHECKOUT_TYPE_NONE: i32 = 2;

/// Wraps `value` in an OData string literal
pub fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Extracts the human-readable message from a SharePoint error body
///
/// Understands both the verbose/minimal form
/// (`{"odata.error": {"message": {"value": "..."}}}`) and the JSON light form
/// (`{"error": {"message": "..."}}`). Returns `None` for anything else.
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let error = json.get("odata.error").or_else(|| json.get("error"))?;
    let message = error.get("message")?;
    match message {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => message.get("value")?.as_str().map(str::to_string),
        _ => None,
    }
}

// ============================================================================
// Response payloads (odata=nometadata)
// ============================================================================

/// `GET /_api/web?$select=Title`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebInfo {
    pub title: String,
}

/// A user reference, e.g. `CheckedOutByUser` or `currentuser`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

/// A file as returned by a file lookup or a folder's `Files` collection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileEntry {
    pub name: String,
    pub server_relative_url: String,
    #[serde(default)]
    pub check_out_type: Option<i32>,
    #[serde(default)]
    pub checked_out_by_user: Option<UserRef>,
}

impl FileEntry {
    pub fn is_checked_out(&self) -> bool {
        self.check_out_type
            .map(|t| t != CHECKOUT_TYPE_NONE)
            .unwrap_or(false)
    }
}

/// A folder as returned by a folder's `Folders` collection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderEntry {
    pub name: String,
    pub server_relative_url: String,
}

/// `GET ...?$select=Exists`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExistsFlag {
    pub exists: bool,
}

/// A collection response: `{"value": [...]}`
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub value: Vec<T>,
}
