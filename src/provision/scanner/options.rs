//! `@`-options attached to scanner payloads
//!
//! `file:/a.jar@5@nostart@update` carries the target `file:/a.jar` and three
//! options. Options are only recognized at the end of the payload; an `@`
//! followed by anything else stays part of the target.

use crate::bundle::BundleReference;

/// Start level, start and update intent parsed from `@` suffixes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScannerOptions {
    pub start_level: Option<u32>,
    pub should_start: Option<bool>,
    pub should_update: Option<bool>,
}

impl ScannerOptions {
    /// Split `payload` into its target and trailing options
    pub fn split(payload: &str) -> (&str, Self) {
        let mut options = Self::default();
        let mut target = payload;

        while let Some((head, tail)) = target.rsplit_once('@') {
            if !options.apply(tail.trim()) {
                break;
            }
            target = head;
        }

        (target.trim(), options)
    }

    /// Options of `self`, falling back to `defaults` for unset ones
    pub fn or(self, defaults: Self) -> Self {
        Self {
            start_level: self.start_level.or(defaults.start_level),
            should_start: self.should_start.or(defaults.should_start),
            should_update: self.should_update.or(defaults.should_update),
        }
    }

    /// Reference to `location` carrying these options
    pub fn reference(&self, location: impl Into<String>) -> BundleReference {
        let mut reference = BundleReference::new(location);
        if let Some(level) = self.start_level {
            reference = reference.with_start_level(level);
        }
        if let Some(start) = self.should_start {
            reference = reference.with_start(start);
        }
        if let Some(update) = self.should_update {
            reference = reference.with_update(update);
        }
        reference
    }

    /// Record one option; false if `option` is not an option
    fn apply(&mut self, option: &str) -> bool {
        // The last occurrence wins, and parsing runs right to left
        match option {
            "start" => {
                self.should_start.get_or_insert(true);
            }
            "nostart" => {
                self.should_start.get_or_insert(false);
            }
            "update" => {
                self.should_update.get_or_insert(true);
            }
            "noupdate" => {
                self.should_update.get_or_insert(false);
            }
            level => match level.parse::<u32>() {
                Ok(level) if level > 0 => {
                    self.start_level.get_or_insert(level);
                }
                _ => return false,
            },
        }
        true
    }
}
