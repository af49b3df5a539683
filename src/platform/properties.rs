//! In-memory writers for framework configuration files
//!
//! Output is built as a `String` first so a rendering error never leaves a
//! half-written file behind.

/// Header written at the top of every generated file
pub const BANNER: &str = r"#                 _
#   ___  ___  __ _(_)_ __ _   _ _ __
#  / _ \/ __|/ _` | | '__| | | | '_ \
# | (_) \__ \ (_| | | |  | |_| | | | |
#  \___/|___/\__, |_|_|   \__,_|_| |_|
#            |___/
#
# Generated by osgirun. Manual changes are overwritten on every launch.
";

/// Java `.properties` style `key=value` writer
#[derive(Debug)]
pub struct PropertiesWriter {
    out: String,
}

impl Default for PropertiesWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertiesWriter {
    /// Writer that starts with the banner
    pub fn new() -> Self {
        Self {
            out: format!("{BANNER}\n"),
        }
    }

    /// `# text`
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.out.push_str("# ");
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// `key=value`
    pub fn property(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.out.push_str(key);
        self.out.push('=');
        self.out.push_str(value.as_ref());
        self.out.push('\n');
        self
    }

    /// `key=value` when `value` is present
    pub fn optional(&mut self, key: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(value) = value {
            self.property(key, value);
        }
        self
    }

    /// Multi-valued property, one value per continuation line
    ///
    /// ```text
    /// key=\
    ///  first<separator>\
    ///  second
    /// ```
    pub fn list(&mut self, key: &str, values: &[String], separator: &str) -> &mut Self {
        self.out.push_str(key);
        self.out.push_str("=\\\n");
        for (index, value) in values.iter().enumerate() {
            self.out.push(' ');
            self.out.push_str(value);
            if index + 1 < values.len() {
                self.out.push_str(separator);
                self.out.push_str("\\\n");
            } else {
                self.out.push('\n');
            }
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Knopflerfish `xargs` writer: one directive per line
#[derive(Debug)]
pub struct XargsWriter {
    out: String,
}

impl Default for XargsWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XargsWriter {
    pub fn new() -> Self {
        Self {
            out: format!("{BANNER}\n"),
        }
    }

    /// `-F<key>=<value>`
    pub fn property(&mut self, key: &str, value: impl AsRef<str>) -> &mut Self {
        self.out.push_str("-F");
        self.out.push_str(key);
        self.out.push('=');
        self.out.push_str(value.as_ref());
        self.out.push('\n');
        self
    }

    pub fn optional(&mut self, key: &str, value: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(value) = value {
            self.property(key, value);
        }
        self
    }

    /// `-<name>` or `-<name> <argument>`
    pub fn directive(&mut self, name: &str, argument: Option<&str>) -> &mut Self {
        self.out.push('-');
        self.out.push_str(name);
        if let Some(argument) = argument {
            self.out.push(' ');
            self.out.push_str(argument);
        }
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Boot delegation value: configured packages then `java.*`, no dedup
pub fn boot_delegation(configured: &[String]) -> String {
    let mut packages: Vec<&str> = configured.iter().map(String::as_str).collect();
    packages.push("java.*");
    packages.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_is_ascii_comment_block() {
        assert!(BANNER.is_ascii());
        assert!(BANNER.lines().all(|line| line.starts_with('#')));
    }

    #[test]
    fn test_properties_writer() {
        let mut writer = PropertiesWriter::new();
        writer
            .property("a", "1")
            .optional("b", None::<&str>)
            .optional("c", Some("3"));
        let out = writer.finish();

        assert!(out.starts_with(BANNER));
        assert!(out.ends_with("a=1\nc=3\n"));
    }

    #[test]
    fn test_list_continuations() {
        let mut writer = PropertiesWriter::new();
        writer.list(
            "osgi.bundles",
            &["reference:file:a.jar".to_string(), "reference:file:b.jar".to_string()],
            ",",
        );
        let out = writer.finish();

        assert!(out.ends_with(
            "osgi.bundles=\\\n reference:file:a.jar,\\\n reference:file:b.jar\n"
        ));
    }

    #[test]
    fn test_xargs_writer() {
        let mut writer = XargsWriter::new();
        writer
            .property("org.osgi.framework.storage", "fwdir")
            .directive("init", None)
            .directive("istart", Some("file:a.jar"));
        let out = writer.finish();

        assert!(out.ends_with("-Forg.osgi.framework.storage=fwdir\n-init\n-istart file:a.jar\n"));
    }

    #[test]
    fn test_boot_delegation_appends_java_without_dedup() {
        assert_eq!(boot_delegation(&[]), "java.*");
        assert_eq!(
            boot_delegation(&["sun.*".to_string(), "java.*".to_string()]),
            "sun.*,java.*,java.*"
        );
    }
}
