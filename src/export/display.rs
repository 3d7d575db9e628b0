//! Human-readable leaf summaries

use std::io::{self, Write};

use super::keys::Keyable;
use crate::leaf::Leaf;

impl Leaf {
    /// `"<name>: <kind>"`, kind lowercased, e.g. `"saddr: ipv4address"`.
    pub fn to_display_string<K: Keyable + ?Sized>(&self, keys: &K, name: &str) -> String {
        format!(
            "{}: {}",
            keys.key_to_display(name),
            self.kind().name().to_lowercase()
        )
    }

    /// Writes the display name on its own line, `indent` tabs deep.
    pub fn write_indented<K: Keyable + ?Sized, W: Write>(
        &self,
        keys: &K,
        name: &str,
        indent: usize,
        writer: &mut W,
    ) -> io::Result<()> {
        let tabs = "\t".repeat(indent);
        writeln!(writer, "{}{}", tabs, keys.key_to_display(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::export::{Keyable, PassthroughKeys};
    use crate::leaf::{Leaf, LeafKind};

    struct Upper;

    impl Keyable for Upper {
        fn key_to_search(&self, name: &str) -> String {
            name.to_string()
        }

        fn key_to_warehouse(&self, name: &str) -> String {
            name.to_string()
        }

        fn key_to_display(&self, name: &str) -> String {
            name.to_uppercase()
        }
    }

    #[test]
    fn test_display_string() {
        let leaf = Leaf::new(LeafKind::IPv4Address);
        assert_eq!(leaf.to_display_string(&PassthroughKeys, "saddr"), "saddr: ipv4address");
        assert_eq!(leaf.to_display_string(&Upper, "saddr"), "SADDR: ipv4address");
    }

    #[test]
    fn test_write_indented() {
        let leaf = Leaf::new(LeafKind::Boolean);
        let mut out = Vec::new();
        leaf.write_indented(&PassthroughKeys, "ok", 2, &mut out).unwrap();
        leaf.write_indented(&PassthroughKeys, "ok", 0, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\t\tok\nok\n");
    }
}
