//! Knopflerfish
//!
//! Configuration is an `xargs` file read by the framework's `Main`:
//!
//! ```text
//! -Forg.osgi.framework.storage=runner/knopflerfish/fwdir
//! -init
//! -initlevel 5
//! -istart file:/bundles/api.jar
//! -install file:/bundles/impl.jar
//! -startlevel 6
//! -launch
//! ```
//!
//! Properties must precede the first bundle directive, so caller properties
//! are written with the framework properties.

use std::path::PathBuf;

use super::builder::{PlatformBuilder, bundle_entries, is_clean};
use super::context::PlatformContext;
use super::naming::{KNOPFLERFISH, PropertyNames};
use super::properties::{XargsWriter, boot_delegation};
use crate::error::Result;

pub const NAME: &str = "knopflerfish";
pub const DEFAULT_VERSION: &str = "8.0.11";
pub const MAIN_CLASS: &str = "org.knopflerfish.framework.Main";

/// Level the framework assigns before any `-initlevel`
const DEFAULT_INIT_LEVEL: u32 = 1;

/// Builder for Knopflerfish 2.0 and later
#[derive(Debug, Clone)]
pub struct KnopflerfishBuilder {
    version: String,
    names: &'static PropertyNames,
}

impl KnopflerfishBuilder {
    pub fn new(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        let names = KNOPFLERFISH.select(&version)?;
        Ok(Self { version, names })
    }

    fn directory(context: &PlatformContext) -> PathBuf {
        context.working_directory().join(NAME)
    }
}

impl PlatformBuilder for KnopflerfishBuilder {
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
        format!("mvn:org.knopflerfish/framework/{}", self.version)
    }

    fn storage_directory(&self, context: &PlatformContext) -> PathBuf {
        Self::directory(context).join("fwdir")
    }

    fn config_file(&self, context: &PlatformContext) -> PathBuf {
        Self::directory(context).join("config.ini")
    }

    fn render(&self, context: &PlatformContext) -> Result<String> {
        let entries = bundle_entries(context)?;
        let configuration = context.configuration();
        let mut writer = XargsWriter::new();

        if let Some(key) = self.names.storage {
            writer.property(key, context.path(&self.storage_directory(context)));
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
        for (key, value) in context.properties() {
            writer.property(key, value);
        }

        if is_clean(context) {
            writer.directive("init", None);
        }

        // -initlevel sticks until the next one, so unleveled bundles reset it
        let mut current_level = DEFAULT_INIT_LEVEL;
        for entry in &entries {
            let level = entry.start_level.unwrap_or(DEFAULT_INIT_LEVEL);
            if level != current_level {
                current_level = level;
                writer.directive("initlevel", Some(&level.to_string()));
            }
            let action = if entry.start { "istart" } else { "install" };
            writer.directive(action, Some(&entry.url));
        }

        if let Some(level) = configuration.start_level {
            writer.directive("startlevel", Some(&level.to_string()));
        }
        writer.directive("launch", None);
        Ok(writer.finish())
    }

    fn arguments(&self, context: &PlatformContext) -> Vec<String> {
        vec![
            "-xargs".to_string(),
            context.path(&self.config_file(context)),
        ]
    }

    fn vm_options(&self, _context: &PlatformContext) -> Vec<String> {
        Vec::new()
    }

    fn required_profile(&self, _context: &PlatformContext) -> Option<String> {
        None
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
    fn test_render_xargs() {
        let builder = KnopflerfishBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration {
            start_level: Some(6),
            bundle_start_level: Some(5),
            use_persisted_state: Some(false),
            ..Configuration::default()
        })
        .with_bundles([
            BundleReference::new("a.jar").with_start(true),
            BundleReference::new("b.jar"),
            BundleReference::new("c.jar").with_start_level(7).with_start(true),
        ])
        .with_property("org.knopflerfish.gosg.jars", "file:jars/");

        let out = builder.render(&ctx).unwrap();

        let body: Vec<&str> = out.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect();
        assert_eq!(
            body,
            vec![
                "-Forg.osgi.framework.storage=knopflerfish/fwdir",
                "-Forg.osgi.framework.bootdelegation=java.*",
                "-Forg.knopflerfish.gosg.jars=file:jars/",
                "-init",
                "-initlevel 5",
                "-istart file:a.jar",
                "-install file:b.jar",
                "-initlevel 7",
                "-istart file:c.jar",
                "-startlevel 6",
                "-launch",
            ]
        );
    }

    #[test]
    fn test_unleveled_bundle_after_leveled_gets_default_level() {
        let builder = KnopflerfishBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration {
            bundle_start_level: None,
            ..Configuration::default()
        })
        .with_bundles([
            BundleReference::new("first.jar"),
            BundleReference::new("a.jar").with_start_level(9),
            BundleReference::new("b.jar"),
        ]);

        let out = builder.render(&ctx).unwrap();

        let directives: Vec<&str> = out
            .lines()
            .filter(|l| l.starts_with("-initlevel") || l.starts_with("-install"))
            .collect();
        assert_eq!(
            directives,
            vec![
                "-install file:first.jar",
                "-initlevel 9",
                "-install file:a.jar",
                "-initlevel 1",
                "-install file:b.jar",
            ]
        );
    }

    #[test]
    fn test_legacy_storage_key() {
        let builder = KnopflerfishBuilder::new("2.3.3").unwrap();
        let out = builder.render(&context(Configuration::default())).unwrap();
        assert!(out.contains("-Forg.osgi.framework.dir=knopflerfish/fwdir\n"));
        assert!(!out.contains("-init\n"));
    }

    #[test]
    fn test_launch_details() {
        let builder = KnopflerfishBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration::default());
        assert_eq!(builder.arguments(&ctx), vec!["-xargs", "knopflerfish/config.ini"]);
        assert!(builder.vm_options(&ctx).is_empty());
        assert_eq!(builder.required_profile(&ctx), None);
        assert_eq!(builder.main_class_name(), "org.knopflerfish.framework.Main");
    }
}
