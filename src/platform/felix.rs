//! Apache Felix
//!
//! Bundles go to numbered auto-properties, one key per action and level:
//!
//! ```text
//! felix.auto.start.10=\
//!  "file:/bundles/api.jar" \
//!  "file:/bundles/impl.jar"
//! felix.auto.install.20=\
//!  "file:/bundles/optional.jar"
//! ```
//!
//! A bundle without an explicit start request is only installed.

use std::path::PathBuf;

use super::builder::{BundleEntry, PlatformBuilder, bundle_entries, is_clean};
use super::context::PlatformContext;
use super::naming::{FELIX, PropertyNames};
use super::properties::{PropertiesWriter, boot_delegation};
use crate::error::Result;

pub const NAME: &str = "felix";
pub const DEFAULT_VERSION: &str = "7.0.5";
pub const MAIN_CLASS: &str = "org.apache.felix.main.Main";
pub const CONSOLE_PROFILE: &str = "gogo";

/// Builder for Felix 1.0 and later
#[derive(Debug, Clone)]
pub struct FelixBuilder {
    version: String,
    names: &'static PropertyNames,
}

impl FelixBuilder {
    pub fn new(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        let names = FELIX.select(&version)?;
        Ok(Self { version, names })
    }

    fn directory(context: &PlatformContext) -> PathBuf {
        context.working_directory().join(NAME)
    }
}

/// Group entries under their auto-property key, keys in first-seen order
fn auto_properties(entries: &[BundleEntry]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for entry in entries {
        let action = if entry.start { "start" } else { "install" };
        let key = match entry.start_level {
            Some(level) => format!("felix.auto.{action}.{level}"),
            None => format!("felix.auto.{action}"),
        };
        let value = format!("\"{}\"", entry.url);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }
    groups
}

impl PlatformBuilder for FelixBuilder {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn main_class_name(&self) -> &str {
        MAIN_CLASS
    }

    fn framework_artifact(&self) -> String {
        format!("mvn:org.apache.felix/org.apache.felix.main/{}", self.version)
    }

    fn storage_directory(&self, context: &PlatformContext) -> PathBuf {
        Self::directory(context).join("cache")
    }

    fn config_file(&self, context: &PlatformContext) -> PathBuf {
        Self::directory(context).join("config.ini")
    }

    fn render(&self, context: &PlatformContext) -> Result<String> {
        let entries = bundle_entries(context)?;
        let configuration = context.configuration();
        let mut writer = PropertiesWriter::new();

        if let Some(key) = self.names.framework_start_level {
            writer.optional(key, configuration.start_level.map(|l| l.to_string()));
        }
        if let Some(key) = self.names.bundle_start_level {
            writer.optional(key, configuration.bundle_start_level.map(|l| l.to_string()));
        }
        writer
            .optional("org.osgi.framework.system.packages", context.system_packages())
            .optional(
                "org.osgi.framework.executionenvironment",
                context.execution_environment(),
            )
            .property(
                "org.osgi.framework.bootdelegation",
                boot_delegation(&configuration.boot_delegation),
            );

        if let Some(key) = self.names.storage {
            writer.property(key, context.path(&self.storage_directory(context)));
        }
        if is_clean(context) {
            if let Some((key, value)) = self.names.clean {
                writer.property(key, value);
            }
        }

        for (key, values) in auto_properties(&entries) {
            writer.list(&key, &values, " ");
        }

        for (key, value) in context.properties() {
            writer.property(key, value);
        }
        Ok(writer.finish())
    }

    fn arguments(&self, context: &PlatformContext) -> Vec<String> {
        vec![context.path(&self.storage_directory(context))]
    }

    fn vm_options(&self, context: &PlatformContext) -> Vec<String> {
        let config = self.config_file(context);
        vec![format!(
            "-Dfelix.config.properties={}",
            context.url(&config.to_string_lossy())
        )]
    }

    fn required_profile(&self, context: &PlatformContext) -> Option<String> {
        context
            .configuration()
            .console
            .then(|| CONSOLE_PROFILE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BundleReference;
    use crate::config::Configuration;
    use crate::platform::path::RelativePathStrategy;
    use std::sync::Arc;

    fn context(configuration: Configuration) -> PlatformContext {
        PlatformContext::new(configuration)
            .with_working_directory("/work")
            .with_path_strategy(Arc::new(RelativePathStrategy::new("/work")))
    }

    #[test]
    fn test_modern_property_names() {
        let builder = FelixBuilder::new("7.0.5").unwrap();
        let configuration = Configuration {
            start_level: Some(6),
            bundle_start_level: Some(5),
            use_persisted_state: Some(false),
            ..Configuration::default()
        };

        let out = builder.render(&context(configuration)).unwrap();

        assert!(out.contains("org.osgi.framework.startlevel.beginning=6\n"));
        assert!(out.contains("felix.startlevel.bundle=5\n"));
        assert!(out.contains("org.osgi.framework.storage=felix/cache\n"));
        assert!(out.contains("org.osgi.framework.storage.clean=onFirstInit\n"));
        assert!(out.contains("org.osgi.framework.bootdelegation=java.*\n"));
    }

    #[test]
    fn test_legacy_property_names() {
        let builder = FelixBuilder::new("1.2.1").unwrap();
        let configuration = Configuration {
            use_persisted_state: Some(false),
            ..Configuration::default()
        };

        let out = builder.render(&context(configuration)).unwrap();

        assert!(out.contains("felix.cache.profiledir=felix/cache\n"));
        assert!(out.contains("org.osgi.framework.startlevel=6\n"));
        assert!(!out.contains("storage.clean"));
    }

    #[test]
    fn test_absent_levels_are_omitted() {
        let builder = FelixBuilder::new(DEFAULT_VERSION).unwrap();
        let configuration = Configuration {
            start_level: None,
            bundle_start_level: None,
            ..Configuration::default()
        };
        let ctx = context(configuration).with_bundles([BundleReference::new("a.jar")]);

        let out = builder.render(&ctx).unwrap();

        assert!(!out.contains("startlevel"));
        assert!(out.contains("felix.auto.install=\\\n \"file:a.jar\"\n"));
    }

    #[test]
    fn test_grouping_keeps_first_seen_key_order() {
        let entries = [
            BundleEntry { url: "a".into(), start_level: Some(3), start: true },
            BundleEntry { url: "b".into(), start_level: Some(1), start: false },
            BundleEntry { url: "c".into(), start_level: Some(3), start: true },
        ];

        let groups = auto_properties(&entries);

        assert_eq!(groups[0].0, "felix.auto.start.3");
        assert_eq!(groups[0].1, vec!["\"a\"", "\"c\""]);
        assert_eq!(groups[1].0, "felix.auto.install.1");
    }

    #[test]
    fn test_launch_details() {
        let builder = FelixBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration::default());

        assert_eq!(builder.main_class_name(), "org.apache.felix.main.Main");
        assert_eq!(builder.arguments(&ctx), vec!["felix/cache"]);
        assert_eq!(
            builder.vm_options(&ctx),
            vec!["-Dfelix.config.properties=file:felix/config.ini"]
        );
        assert_eq!(builder.required_profile(&ctx).as_deref(), Some("gogo"));
        assert_eq!(
            builder.framework_artifact(),
            "mvn:org.apache.felix/org.apache.felix.main/7.0.5"
        );
    }

    #[test]
    fn test_no_console_no_profile() {
        let builder = FelixBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration {
            console: false,
            ..Configuration::default()
        });
        assert_eq!(builder.required_profile(&ctx), None);
    }
}
