//! The JVM command line for a prepared framework

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Configuration;

/// Everything needed to spawn the framework JVM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub java: PathBuf,
    pub vm_options: Vec<String>,
    pub classpath: Vec<PathBuf>,
    pub main_class: String,
    pub arguments: Vec<String>,
    pub working_directory: PathBuf,
}

impl LaunchCommand {
    /// `java` under `java_home`, or `java` from `PATH`
    pub fn java_executable(java_home: Option<&Path>) -> PathBuf {
        let name = if cfg!(windows) { "java.exe" } else { "java" };
        match java_home {
            Some(home) => home.join("bin").join(name),
            None => PathBuf::from(name),
        }
    }

    /// JVM options from the configuration followed by the framework's own
    pub fn collect_vm_options(configuration: &Configuration, framework: Vec<String>) -> Vec<String> {
        let mut options = configuration.vm_options.clone();
        if configuration.debug {
            options.push(format!(
                "-agentlib:jdwp=transport=dt_socket,server=y,suspend=y,address={}",
                configuration.debug_port
            ));
        }
        options.extend(framework);
        options
    }

    /// Classpath joined with the platform separator
    pub fn classpath_string(&self) -> String {
        let separator = if cfg!(windows) { ";" } else { ":" };
        self.classpath
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Program arguments in spawn order
    pub fn args(&self) -> Vec<String> {
        let mut args = self.vm_options.clone();
        if !self.classpath.is_empty() {
            args.push("-cp".to_string());
            args.push(self.classpath_string());
        }
        args.push(self.main_class.clone());
        args.extend(self.arguments.iter().cloned());
        args
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.java);
        command.args(self.args()).current_dir(&self.working_directory);
        command
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.java.display().to_string()))?;
        for arg in self.args() {
            write!(f, " {}", quote(&arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display when it holds whitespace or quotes
fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
