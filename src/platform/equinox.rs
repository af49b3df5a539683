//! Eclipse Equinox
//!
//! All bundles share the multi-valued `osgi.bundles` property:
//!
//! ```text
//! osgi.bundles=\
//!  reference:file:/bundles/api.jar@10:start,\
//!  reference:file:/bundles/impl.jar@5
//! ```

use std::path::PathBuf;

use super::builder::{BundleEntry, PlatformBuilder, bundle_entries, is_clean};
use super::context::PlatformContext;
use super::naming::{EQUINOX, PropertyNames, Version};
use super::properties::{PropertiesWriter, boot_delegation};
use crate::error::Result;

pub const NAME: &str = "equinox";
pub const DEFAULT_VERSION: &str = "3.18.600";
pub const MAIN_CLASS: &str = "org.eclipse.core.runtime.adaptor.EclipseStarter";
pub const CONSOLE_PROFILE: &str = "equinox-console";

/// From 3.8 on the console is a separate set of bundles
const SEPARATE_CONSOLE_SINCE: &[u32] = &[3, 8];

/// Builder for Equinox 3.0 and later
#[derive(Debug, Clone)]
pub struct EquinoxBuilder {
    version: String,
    names: &'static PropertyNames,
}

impl EquinoxBuilder {
    pub fn new(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        let names = EQUINOX.select(&version)?;
        Ok(Self { version, names })
    }

    fn directory(context: &PlatformContext) -> PathBuf {
        context.working_directory().join(NAME)
    }
}

/// `reference:<url>[@<level>][:start]`
fn osgi_bundle(entry: &BundleEntry) -> String {
    match (entry.start_level, entry.start) {
        (Some(level), true) => format!("reference:{}@{level}:start", entry.url),
        (Some(level), false) => format!("reference:{}@{level}", entry.url),
        (None, true) => format!("reference:{}@start", entry.url),
        (None, false) => format!("reference:{}", entry.url),
    }
}

impl PlatformBuilder for EquinoxBuilder {
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
        format!("mvn:org.eclipse.platform/org.eclipse.osgi/{}", self.version)
    }

    fn storage_directory(&self, context: &PlatformContext) -> PathBuf {
        Self::directory(context).join("org.eclipse.osgi")
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

        if is_clean(context) {
            if let Some((key, value)) = self.names.clean {
                writer.property(key, value);
            }
        }
        writer
            .property("eclipse.ignoreApp", "true")
            .property("osgi.noShutdown", "true");

        if !entries.is_empty() {
            let bundles: Vec<String> = entries.iter().map(osgi_bundle).collect();
            writer.list("osgi.bundles", &bundles, ",");
        }

        for (key, value) in context.properties() {
            writer.property(key, value);
        }
        Ok(writer.finish())
    }

    fn arguments(&self, context: &PlatformContext) -> Vec<String> {
        let mut arguments = Vec::new();
        if context.configuration().console {
            arguments.push("-console".to_string());
        }
        arguments.extend([
            "-configuration".to_string(),
            context.path(&Self::directory(context)),
            "-install".to_string(),
            context.path(context.working_directory()),
        ]);
        arguments
    }

    fn vm_options(&self, context: &PlatformContext) -> Vec<String> {
        vec![format!(
            "-Dosgi.install.area={}",
            context.path(context.working_directory())
        )]
    }

    fn required_profile(&self, context: &PlatformContext) -> Option<String> {
        let separate_console = Version::parse(&self.version)
            .is_some_and(|version| version.at_least(SEPARATE_CONSOLE_SINCE));
        (context.configuration().console && separate_console).then(|| CONSOLE_PROFILE.to_string())
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
    fn test_bundle_entry_forms() {
        let entry = |level, start| BundleEntry {
            url: "file:a.jar".to_string(),
            start_level: level,
            start,
        };
        assert_eq!(osgi_bundle(&entry(Some(4), true)), "reference:file:a.jar@4:start");
        assert_eq!(osgi_bundle(&entry(Some(4), false)), "reference:file:a.jar@4");
        assert_eq!(osgi_bundle(&entry(None, true)), "reference:file:a.jar@start");
        assert_eq!(osgi_bundle(&entry(None, false)), "reference:file:a.jar");
    }

    #[test]
    fn test_render_bundles_in_input_order() {
        let builder = EquinoxBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration {
            bundle_start_level: Some(5),
            use_persisted_state: Some(false),
            boot_delegation: vec!["sun.*".to_string()],
            ..Configuration::default()
        })
        .with_bundles([
            BundleReference::new("z.jar").with_start_level(10).with_start(true),
            BundleReference::new("a.jar"),
        ])
        .with_property("custom.key", "value");

        let out = builder.render(&ctx).unwrap();

        assert!(out.contains("osgi.startLevel=6\n"));
        assert!(out.contains("osgi.bundles.defaultStartLevel=5\n"));
        assert!(out.contains("org.osgi.framework.bootdelegation=sun.*,java.*\n"));
        assert!(out.contains("osgi.clean=true\n"));
        assert!(out.contains("eclipse.ignoreApp=true\n"));
        assert!(out.contains(
            "osgi.bundles=\\\n reference:file:z.jar@10:start,\\\n reference:file:a.jar@5\n"
        ));
        assert!(out.ends_with("custom.key=value\n"));
    }

    #[test]
    fn test_persisted_state_kept_has_no_clean_flag() {
        let builder = EquinoxBuilder::new(DEFAULT_VERSION).unwrap();
        let out = builder.render(&context(Configuration::default())).unwrap();
        assert!(!out.contains("osgi.clean"));
        assert!(!out.contains("osgi.bundles="));
    }

    #[test]
    fn test_arguments_and_vm_options() {
        let builder = EquinoxBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration::default());

        assert_eq!(
            builder.arguments(&ctx),
            vec!["-console", "-configuration", "equinox", "-install", "."]
        );
        assert_eq!(builder.vm_options(&ctx), vec!["-Dosgi.install.area=."]);

        let quiet = context(Configuration {
            console: false,
            ..Configuration::default()
        });
        assert_eq!(builder.arguments(&quiet)[0], "-configuration");
    }

    #[test]
    fn test_console_profile_only_from_3_8() {
        let ctx = context(Configuration::default());
        assert_eq!(
            EquinoxBuilder::new("3.8.2").unwrap().required_profile(&ctx).as_deref(),
            Some("equinox-console")
        );
        assert_eq!(EquinoxBuilder::new("3.6.2").unwrap().required_profile(&ctx), None);
    }

    #[test]
    fn test_storage_and_config_locations() {
        let builder = EquinoxBuilder::new(DEFAULT_VERSION).unwrap();
        let ctx = context(Configuration::default());
        assert_eq!(builder.config_file(&ctx), PathBuf::from("/work/equinox/config.ini"));
        assert_eq!(
            builder.storage_directory(&ctx),
            PathBuf::from("/work/equinox/org.eclipse.osgi")
        );
    }
}
