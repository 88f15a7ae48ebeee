//! SQL read-only admission guard.
//!
//! Decides whether a client-supplied statement may be forwarded to the
//! reader credential tier. This is a secondary control: the reader account
//! itself must be restricted to SELECT at the database level, and the guard
//! must never be relied on as the sole defense.

/// Admission check for client-supplied SQL.
pub struct SqlGuard;

/// Substrings that disqualify a statement, matched case-insensitively
/// anywhere in the text.
///
/// Substring matching (rather than tokenizing) intentionally also catches
/// keywords smuggled inside comments or string literals, at the cost of
/// false positives on benign identifiers such as `updated_at`.
const DENIED_KEYWORDS: [&str; 15] = [
    "insert", "update", "delete", "drop", "create", "alter", "truncate", "replace", "grant",
    "revoke", "set ", "call", "exec", "execute", "prepare",
];

impl SqlGuard {
    /// Returns true if the statement is admissible as a read-only query.
    ///
    /// The text must already be percent-decoded; decoding happens exactly
    /// once, in the route extractor. The check is: trim, lower-case, require
    /// a `select` prefix, then reject on any deny-listed substring. Empty
    /// input is rejected.
    pub fn is_read_only(sql: &str) -> bool {
        let normalized = sql.trim().to_lowercase();
        if !normalized.starts_with("select") {
            return false;
        }
        DENIED_KEYWORDS.iter().all(|keyword| !normalized.contains(keyword))
    }
}
