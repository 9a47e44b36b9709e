//! Typed UCI command batch.
//!
//! The SSH flow drives the router's `uci` tool with shell command
//! strings. Values (SSIDs, passwords) come from operator input, so
//! they are never spliced into the command line raw: every value is
//! single-quoted with embedded quotes escaped, closing the injection
//! hole that naive string concatenation would open.

use std::fmt::Write as _;

/// Quote a value for a POSIX shell: wrap in single quotes, with every
/// embedded single quote rendered as `'\''`.
pub fn shell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// An ordered batch of UCI commands, rendered to one shell line and
/// executed in a single SSH round trip.
#[derive(Debug, Default)]
pub struct UciBatch {
    commands: Vec<String>,
}

impl UciBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// `uci add <config> <section-type>` -- append an anonymous section.
    pub fn add(&mut self, config: &str, section_type: &str) -> &mut Self {
        self.commands.push(format!("uci add {config} {section_type}"));
        self
    }

    /// `uci set <path>=<value>` with the value shell-quoted.
    ///
    /// Paths are always program-controlled constants; only the value
    /// may carry operator input.
    pub fn set(&mut self, path: &str, value: &str) -> &mut Self {
        let mut cmd = String::new();
        // path contains brackets, which some shells glob -- quote it too
        let _ = write!(cmd, "uci set {}={}", shell_quote(path), shell_quote(value));
        self.commands.push(cmd);
        self
    }

    /// `uci delete <path>`.
    pub fn delete(&mut self, path: &str) -> &mut Self {
        self.commands.push(format!("uci delete {}", shell_quote(path)));
        self
    }

    /// `uci commit` -- persist staged changes.
    pub fn commit(&mut self) -> &mut Self {
        self.commands.push("uci commit".to_owned());
        self
    }

    /// `reload_config` -- have the router pick up committed changes.
    pub fn reload(&mut self) -> &mut Self {
        self.commands.push("reload_config".to_owned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Render the batch as one `;`-joined shell line.
    pub fn render(&self) -> String {
        self.commands.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn quote_plain_value() {
        assert_eq!(shell_quote("HomeNet"), "'HomeNet'");
    }

    #[test]
    fn quote_escapes_embedded_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn quote_neutralizes_shell_metacharacters() {
        // A hostile SSID must stay inside the quoted value.
        let quoted = shell_quote("x'; reboot; '");
        assert_eq!(quoted, r"'x'\''; reboot; '\'''");
    }

    #[test]
    fn set_quotes_path_and_value() {
        let mut batch = UciBatch::new();
        batch.set("multi_wifi.@wifi-iface[-1].ssid", "Cafe Wifi");
        assert_eq!(
            batch.render(),
            "uci set 'multi_wifi.@wifi-iface[-1].ssid'='Cafe Wifi'"
        );
    }

    #[test]
    fn batch_renders_in_insertion_order() {
        let mut batch = UciBatch::new();
        batch
            .add("multi_wifi", "wifi-iface")
            .set("multi_wifi.@wifi-iface[-1].enabled", "1")
            .commit()
            .reload();
        assert_eq!(
            batch.render(),
            "uci add multi_wifi wifi-iface; \
             uci set 'multi_wifi.@wifi-iface[-1].enabled'='1'; \
             uci commit; reload_config"
        );
    }
}
