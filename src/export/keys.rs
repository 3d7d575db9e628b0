//! Field-name formatting seam
//!
//! Backends disagree on what a field may be called. The exporters never
//! format names themselves; they ask a [`Keyable`] for each backend's form.

/// Formats a raw field name for each backend.
pub trait Keyable {
    /// Name as it appears in the search-index mapping
    fn key_to_search(&self, name: &str) -> String;

    /// Name as it appears in the warehouse table schema
    fn key_to_warehouse(&self, name: &str) -> String;

    /// Name as shown to people
    fn key_to_display(&self, name: &str) -> String;
}

/// Uses the raw name everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughKeys;

impl Keyable for PassthroughKeys {
    fn key_to_search(&self, name: &str) -> String {
        name.to_string()
    }

    fn key_to_warehouse(&self, name: &str) -> String {
        name.to_string()
    }

    fn key_to_display(&self, name: &str) -> String {
        name.to_string()
    }
}

impl<K: Keyable + ?Sized> Keyable for &K {
    fn key_to_search(&self, name: &str) -> String {
        (**self).key_to_search(name)
    }

    fn key_to_warehouse(&self, name: &str) -> String {
        (**self).key_to_warehouse(name)
    }

    fn key_to_display(&self, name: &str) -> String {
        (**self).key_to_display(name)
    }
}
