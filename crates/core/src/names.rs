//! Display-name helpers.

/// Split a full name into first name and the remaining names.
///
/// The first whitespace-separated token is the first name; every other
/// token is joined with a single space into the last name, which is empty
/// for single-word names.
///
/// ```
/// use tracker_core::names::split_name;
/// assert_eq!(split_name("  Mary Ann Lee "), ("Mary".to_string(), "Ann Lee".to_string()));
/// assert_eq!(split_name("Madonna"), ("Madonna".to_string(), String::new()));
/// ```
pub fn split_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, rest)
}
