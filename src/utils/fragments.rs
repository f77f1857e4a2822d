//! Reassembly of documents split across multiple result rows.
//!
//! Stored procedures that serialize their result to JSON return it as a
//! single text column, but drivers cap the column size, so large documents
//! arrive split across several rows. Row order is the only ordering
//! information, so fragments are concatenated exactly as they arrive.

/// Concatenates ordered text fragments into one string.
///
/// `None` entries are skipped. An empty iterator, or one yielding only
/// `None`, produces an empty string. Callers must treat an empty result as
/// "no data", never as a parse target.
///
/// # Examples
///
/// ```
/// use promo_relay::utils::fragments::assemble;
///
/// let doc = assemble(vec![
///     Some("{\"a\":1,".to_string()),
///     None,
///     Some("\"b\":2}".to_string()),
/// ]);
/// assert_eq!(doc, "{\"a\":1,\"b\":2}");
/// ```
pub fn assemble<I>(rows: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut out = String::new();
    for row in rows {
        if let Some(chunk) = row {
            out.push_str(&chunk);
        }
    }
    out
}
