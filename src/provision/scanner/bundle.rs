//! `scan-bundle`: one bundle URL per specification

use super::{Scanner, ScannerOptions};
use crate::bundle::BundleReference;
use crate::error::{Result, provision};

pub const SCHEME: &str = "scan-bundle";

/// Scanner producing exactly one bundle from `url[@options]`
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleScanner;

impl Scanner for BundleScanner {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn scan(&self, payload: &str) -> Result<Vec<BundleReference>> {
        let (target, options) = ScannerOptions::split(payload);
        if target.is_empty() {
            return Err(provision::scanner_failed(
                SCHEME,
                payload,
                "no bundle location given",
            ));
        }
        Ok(vec![options.reference(target)])
    }
}
