//! `scan-pom`: the runtime dependencies of a Maven POM
//!
//! Every `<dependency>` directly under `<project><dependencies>` becomes an
//! `mvn:group/artifact/version` bundle unless its scope is `test` or
//! `provided` or its type is neither `jar` nor `bundle`. Entries in
//! `<dependencyManagement>` are ignored.

use std::collections::HashMap;
use std::fs;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use super::file::expand_placeholders;
use super::{Scanner, ScannerOptions};
use crate::bundle::BundleReference;
use crate::common::location;
use crate::error::{Result, provision};

pub const SCHEME: &str = "scan-pom";

const DEPENDENCY_PATH: &[&str] = &["project", "dependencies", "dependency"];

/// Scanner reading dependencies from a local `pom.xml`
#[derive(Debug, Clone, Copy, Default)]
pub struct PomScanner;

impl Scanner for PomScanner {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn scan(&self, payload: &str) -> Result<Vec<BundleReference>> {
        let (target, options) = ScannerOptions::split(payload);
        let path = location::to_local_path(target).ok_or_else(|| {
            provision::scanner_failed(SCHEME, target, "only local POM files are supported")
        })?;
        let content = fs::read_to_string(&path)
            .map_err(|e| provision::scanner_failed(SCHEME, target, e.to_string()))?;

        let pom = Pom::parse(&content)
            .map_err(|reason| provision::scanner_failed(SCHEME, target, reason))?;

        let mut bundles = Vec::new();
        for dependency in &pom.dependencies {
            if !dependency.is_runtime_bundle() {
                debug!(artifact = %dependency.artifact_id, "skipping dependency");
                continue;
            }
            let coordinates = pom
                .coordinates(dependency)
                .map_err(|reason| provision::scanner_failed(SCHEME, target, reason))?;
            bundles.push(options.reference(coordinates));
        }

        debug!(pom = %path.display(), count = bundles.len(), "scanned POM");
        Ok(bundles)
    }
}

#[derive(Debug, Default, Clone)]
struct Dependency {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<String>,
    kind: Option<String>,
    classifier: Option<String>,
}

impl Dependency {
    fn is_runtime_bundle(&self) -> bool {
        let scope_ok = !matches!(self.scope.as_deref(), Some("test" | "provided"));
        let kind_ok = matches!(self.kind.as_deref(), None | Some("jar" | "bundle"));
        scope_ok && kind_ok
    }
}

#[derive(Debug, Default)]
struct Pom {
    group_id: Option<String>,
    version: Option<String>,
    parent_group_id: Option<String>,
    parent_version: Option<String>,
    properties: HashMap<String, String>,
    dependencies: Vec<Dependency>,
}

impl Pom {
    fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut pom = Pom::default();
        let mut stack: Vec<String> = Vec::new();
        let mut current: Option<Dependency> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    stack.push(name);
                    if stack == DEPENDENCY_PATH {
                        current = Some(Dependency::default());
                    }
                }
                Ok(Event::End(_)) => {
                    if stack == DEPENDENCY_PATH {
                        pom.dependencies.extend(current.take());
                    }
                    stack.pop();
                }
                Ok(Event::Text(e)) => {
                    let text = e.decode().map_err(|e| e.to_string())?.trim().to_string();
                    pom.record(&stack, text, current.as_mut());
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(format!(
                        "invalid XML at position {}: {e}",
                        reader.error_position()
                    ));
                }
                Ok(_) => {}
            }
        }

        if !stack.is_empty() {
            return Err("unexpected end of document".to_string());
        }
        Ok(pom)
    }

    fn record(&mut self, stack: &[String], text: String, dependency: Option<&mut Dependency>) {
        let path: Vec<&str> = stack.iter().map(String::as_str).collect();
        match path.as_slice() {
            ["project", "groupId"] => self.group_id = Some(text),
            ["project", "version"] => self.version = Some(text),
            ["project", "parent", "groupId"] => self.parent_group_id = Some(text),
            ["project", "parent", "version"] => self.parent_version = Some(text),
            ["project", "properties", key] => {
                self.properties.insert((*key).to_string(), text);
            }
            ["project", "dependencies", "dependency", field] => {
                if let Some(dependency) = dependency {
                    match *field {
                        "groupId" => dependency.group_id = text,
                        "artifactId" => dependency.artifact_id = text,
                        "version" => dependency.version = Some(text),
                        "scope" => dependency.scope = Some(text),
                        "type" => dependency.kind = Some(text),
                        "classifier" => dependency.classifier = Some(text),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "project.version" | "pom.version" | "version" => self
                .version
                .clone()
                .or_else(|| self.parent_version.clone()),
            "project.groupId" | "pom.groupId" | "groupId" => self
                .group_id
                .clone()
                .or_else(|| self.parent_group_id.clone()),
            "project.parent.version" => self.parent_version.clone(),
            other => self.properties.get(other).cloned(),
        }
    }

    fn expand(&self, value: &str) -> std::result::Result<String, String> {
        expand_placeholders(value, &|name| self.lookup(name))
            .map_err(|name| format!("unresolved placeholder ${{{name}}} in '{value}'"))
    }

    fn coordinates(&self, dependency: &Dependency) -> std::result::Result<String, String> {
        let group = self.expand(&dependency.group_id)?;
        let artifact = self.expand(&dependency.artifact_id)?;
        let version = dependency
            .version
            .as_deref()
            .ok_or_else(|| format!("dependency {group}:{artifact} has no version"))?;
        let version = self.expand(version)?;

        let mut coordinates = format!("mvn:{group}/{artifact}/{version}");
        if let Some(classifier) = &dependency.classifier {
            let kind = dependency.kind.as_deref().unwrap_or("jar");
            coordinates.push_str(&format!("/{kind}/{}", self.expand(classifier)?));
        }
        Ok(coordinates)
    }
}
