//! Field keys and event names shared by the logging macros and by tests
//! that assert on captured events.

// Stamped on every lifecycle event
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Which constraints file was loaded, and what came out of it
pub const FIELD_FILE: &str = "file";
pub const FIELD_DIR: &str = "dir";
pub const FIELD_ENCODING: &str = "encoding";
pub const FIELD_CONSTRAINT_COUNT: &str = "constraint_count";

// Stamped on `end_error` events
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Values of the `event` field
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Values of the `encoding` field
pub const ENCODING_TAG_STREAM: &str = "xml";
pub const ENCODING_SCHEMA_TREE: &str = "json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_values_distinct() {
        let events = [EVENT_START, EVENT_END, EVENT_END_ERROR];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_keys_namespaced() {
        assert!(FIELD_ERR_KIND.starts_with("err."));
        assert!(FIELD_ERR_CODE.starts_with("err."));
    }

    #[test]
    fn test_encoding_names_match_file_extensions() {
        assert_eq!(ENCODING_TAG_STREAM, "xml");
        assert_eq!(ENCODING_SCHEMA_TREE, "json");
    }
}
