//! Scheme → scanner routing
//!
//! [`ProvisionService`] keeps an open registry of scanners keyed by scheme.
//! Registrations may arrive at any time (directly or through a
//! [`ScannerEvent`] channel), so the map sits behind one mutex. A lookup
//! clones the scanner handle under the lock and scans outside it.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use super::scanner::{self, Scanner};
use super::spec::ProvisionSpec;
use crate::bundle::BundleReference;
use crate::error::{OsgiRunError, Result, provision};

/// Registry change delivered by a notification source
#[allow(dead_code)] // used in tests
pub enum ScannerEvent {
    Registered {
        scheme: String,
        scanner: Arc<dyn Scanner>,
    },
    Unregistered {
        scheme: String,
    },
}

impl std::fmt::Debug for ScannerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registered { scheme, .. } => write!(f, "Registered({scheme})"),
            Self::Unregistered { scheme } => write!(f, "Unregistered({scheme})"),
        }
    }
}

/// Routes provisioning specifications to registered scanners
#[derive(Default)]
pub struct ProvisionService {
    scanners: Mutex<HashMap<String, Arc<dyn Scanner>>>,
}

impl ProvisionService {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `scan-*` scanners
    pub fn with_default_scanners() -> Self {
        let service = Self::new();
        for scanner in scanner::default_scanners() {
            let scheme = scanner.scheme().to_string();
            service.add_scanner(scheme, Arc::from(scanner));
        }
        service
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn Scanner>>> {
        // A panicking scanner never runs under the lock, so the map is intact
        self.scanners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `scanner` for `scheme`, returning the one it replaces
    pub fn add_scanner(
        &self,
        scheme: impl Into<String>,
        scanner: Arc<dyn Scanner>,
    ) -> Option<Arc<dyn Scanner>> {
        let scheme = scheme.into();
        debug!(scheme = %scheme, "registering scanner");
        self.registry().insert(scheme, scanner)
    }

    /// Unregister the scanner for `scheme`
    #[allow(dead_code)]
    pub fn remove_scanner(&self, scheme: &str) -> Option<Arc<dyn Scanner>> {
        debug!(scheme, "unregistering scanner");
        self.registry().remove(scheme)
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.registry().keys().cloned().collect();
        schemes.sort();
        schemes
    }

    /// Scan one `<scheme>:<payload>` specification
    pub fn scan(&self, spec: &str) -> Result<Vec<BundleReference>> {
        let spec = ProvisionSpec::parse(spec)?;
        let scanner = self
            .registry()
            .get(spec.scheme())
            .cloned()
            .ok_or_else(|| provision::unsupported_schema(spec.scheme()))?;

        let bundles = scanner.scan(spec.path()).map_err(|err| match err {
            OsgiRunError::Scanner { .. } => err,
            other => provision::scanner_failed(spec.scheme(), spec.path(), other.to_string()),
        })?;

        info!(spec = %spec, count = bundles.len(), "provisioned bundles");
        Ok(bundles)
    }

    /// Scan every specification in order, concatenating the results
    pub fn scan_all<S: AsRef<str>>(&self, specs: &[S]) -> Result<Vec<BundleReference>> {
        let mut bundles = Vec::new();
        for spec in specs {
            bundles.extend(self.scan(spec.as_ref())?);
        }
        Ok(bundles)
    }

    /// Apply one registry event
    #[allow(dead_code)]
    pub fn apply(&self, event: ScannerEvent) {
        match event {
            ScannerEvent::Registered { scheme, scanner } => {
                self.add_scanner(scheme, scanner);
            }
            ScannerEvent::Unregistered { scheme } => {
                self.remove_scanner(&scheme);
            }
        }
    }

    /// Apply events from `events` on a worker thread until every sender is gone
    #[allow(dead_code)] // used in tests
    pub fn listen(self: &Arc<Self>, events: Receiver<ScannerEvent>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        thread::spawn(move || {
            for event in events {
                debug!(?event, "scanner registry event");
                service.apply(event);
            }
            debug!("scanner event source closed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    /// Returns a fixed bundle list
    struct StubScanner(Vec<&'static str>);

    impl Scanner for StubScanner {
        fn scheme(&self) -> &str {
            "stub"
        }

        fn scan(&self, _payload: &str) -> Result<Vec<BundleReference>> {
            Ok(self.0.iter().map(|l| BundleReference::new(*l)).collect())
        }
    }

    /// Fails with a non-scanner error
    struct BrokenScanner;

    impl Scanner for BrokenScanner {
        fn scheme(&self) -> &str {
            "broken"
        }

        fn scan(&self, _payload: &str) -> Result<Vec<BundleReference>> {
            Err(OsgiRunError::IoError {
                message: "connection reset".to_string(),
            })
        }
    }

    #[test]
    fn test_scan_routes_to_registered_scanner() {
        let service = ProvisionService::new();
        service.add_scanner("stub", Arc::new(StubScanner(vec!["a.jar", "b.jar"])));

        let bundles = service.scan("stub:anything:with:colons").unwrap();

        let locations: Vec<_> = bundles.iter().filter_map(|b| b.location()).collect();
        assert_eq!(locations, vec!["a.jar", "b.jar"]);
    }

    #[test]
    fn test_scan_unregistered_scheme() {
        let service = ProvisionService::new();
        let err = service.scan("nope:payload").unwrap_err();
        assert!(matches!(err, OsgiRunError::UnsupportedSchema { scheme } if scheme == "nope"));
    }

    #[test]
    fn test_scan_malformed_before_routing() {
        let service = ProvisionService::with_default_scanners();
        for spec in ["", "  ", "scan-bundle"] {
            let err = service.scan(spec).unwrap_err();
            assert!(matches!(err, OsgiRunError::MalformedSpecification { .. }));
        }
    }

    #[test]
    fn test_scanner_failures_surface_as_scanner_errors() {
        let service = ProvisionService::new();
        service.add_scanner("broken", Arc::new(BrokenScanner));

        let err = service.scan("broken:x").unwrap_err();

        assert!(matches!(err, OsgiRunError::Scanner { .. }));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_default_schemes() {
        let service = ProvisionService::with_default_scanners();
        assert_eq!(
            service.schemes(),
            vec!["scan-bundle", "scan-dir", "scan-file", "scan-pom"]
        );
    }

    #[test]
    fn test_add_replaces_and_remove_unregisters() {
        let service = ProvisionService::new();
        assert!(service.add_scanner("stub", Arc::new(StubScanner(vec!["a"]))).is_none());
        assert!(service.add_scanner("stub", Arc::new(StubScanner(vec!["b"]))).is_some());
        assert_eq!(service.scan("stub:x").unwrap()[0].location(), Some("b"));

        assert!(service.remove_scanner("stub").is_some());
        assert!(!service.schemes().contains(&"stub".to_string()));
        assert!(service.remove_scanner("stub").is_none());
    }

    #[test]
    fn test_scan_all_keeps_order() {
        let service = ProvisionService::with_default_scanners();
        let bundles = service
            .scan_all(&["scan-bundle:file:/b.jar", "scan-bundle:file:/a.jar@3"])
            .unwrap();
        assert_eq!(bundles[0].location(), Some("file:/b.jar"));
        assert_eq!(bundles[1].start_level(), Some(3));
    }

    #[test]
    fn test_listen_applies_events() {
        let service = Arc::new(ProvisionService::new());
        let (tx, rx) = mpsc::channel();
        let worker = service.listen(rx);

        tx.send(ScannerEvent::Registered {
            scheme: "stub".to_string(),
            scanner: Arc::new(StubScanner(vec!["x.jar"])),
        })
        .unwrap();
        tx.send(ScannerEvent::Registered {
            scheme: "other".to_string(),
            scanner: Arc::new(StubScanner(vec![])),
        })
        .unwrap();
        tx.send(ScannerEvent::Unregistered {
            scheme: "other".to_string(),
        })
        .unwrap();
        drop(tx);
        worker.join().unwrap();

        assert_eq!(service.schemes(), vec!["stub"]);
        assert_eq!(service.scan("stub:p").unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_registration_and_lookup() {
        let service = Arc::new(ProvisionService::new());
        service.add_scanner("stub", Arc::new(StubScanner(vec!["a.jar"])));

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for n in 0..50 {
                        let scheme = format!("s{i}-{n}");
                        service.add_scanner(scheme.clone(), Arc::new(StubScanner(vec![])));
                        service.remove_scanner(&scheme);
                    }
                })
            })
            .collect();
        for _ in 0..100 {
            assert_eq!(service.scan("stub:x").unwrap().len(), 1);
        }
        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(service.schemes(), vec!["stub"]);
    }
}
