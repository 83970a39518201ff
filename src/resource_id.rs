//! Composite `hub:resource` identifiers.
//!
//! Resources live inside a hub, so a single string that names one carries
//! both IDs separated by the first colon.

/// Joins a hub ID and a resource ID.
///
/// # Example
///
/// ```
/// use amplience_mgmt::resource_id::create_id;
///
/// assert_eq!(create_id("hub", "abc"), "hub:abc");
/// ```
#[must_use]
pub fn create_id(hub_id: &str, resource_id: &str) -> String {
    format!("{hub_id}:{resource_id}")
}

/// Splits an identifier at the first colon into `(hub_id, resource_id)`.
///
/// Without a colon the whole input is the resource ID and the hub ID is
/// empty.
#[must_use]
pub fn parse_id(id: &str) -> (&str, &str) {
    id.split_once(':').unwrap_or(("", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_parse() {
        let id = create_id("5c1a2b", "webhook-1");

        assert_eq!(parse_id(&id), ("5c1a2b", "webhook-1"));
    }

    #[test]
    fn parse_without_colon_has_empty_hub() {
        assert_eq!(parse_id("webhook-1"), ("", "webhook-1"));
    }

    #[test]
    fn parse_splits_at_first_colon_only() {
        assert_eq!(parse_id("hub:a:b"), ("hub", "a:b"));
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_id(""), ("", ""));
    }
}
