//! Storage backend implementations.
//!
//! Both backends behave like a key-value store: storing a payload replaces
//! the channels it carries and leaves the others untouched.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use canvas_model::StoredPayload;

/// Overwrite the channels present in `incoming`.
fn merge_payload(target: &mut StoredPayload, incoming: &StoredPayload) {
    if let Some(css) = &incoming.css {
        target.css = Some(css.clone());
    }
    if let Some(styles) = &incoming.styles {
        target.styles = Some(styles.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_untouched_channels() {
        let mut cached = StoredPayload {
            css: Some(".a{color:red;}".to_string()),
            styles: Some("[]".to_string()),
        };
        merge_payload(&mut cached, &StoredPayload::from_css(".b{color:blue;}"));
        assert_eq!(cached.css(), Some(".b{color:blue;}"));
        assert_eq!(cached.styles(), Some("[]"));
    }
}
