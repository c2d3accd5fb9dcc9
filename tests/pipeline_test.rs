use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use cache_recon::core::{FetchErrorKind, TransportError};
use cache_recon::patterns::PatternRegistry;
use cache_recon::utils::HttpResponse;
use cache_recon::{run_recon, CacheSource, ReconOptions, Transport};

/// Transport serving canned responses keyed by request URL. URLs with no
/// entry behave like an unreachable host.
struct CannedTransport {
    responses: HashMap<String, HttpResponse>,
}

impl CannedTransport {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn with(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), HttpResponse::new(status, body.as_bytes().to_vec()));
        self
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn get(
        &self,
        url: &str,
        _timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        match self.responses.get(url) {
            Some(response) => Ok(response.clone()),
            None => Err(TransportError::Connection("host unreachable".to_string())),
        }
    }
}

fn wayback_url(target: &str) -> String {
    format!("http://web.archive.org/web/{}", target)
}

fn google_url(target: &str) -> String {
    format!("https://webcache.googleusercontent.com/search?q=cache:{}", target)
}

#[tokio::test]
async fn wayback_404_yields_one_not_found_failure() {
    let transport = CannedTransport::new().with(&wayback_url("http://example.com"), 404, "");

    let report = run_recon(
        Arc::new(transport),
        &["http://example.com".to_string()],
        &[CacheSource::Wayback],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    let summary = report.summary();
    assert_eq!(summary.total_tasks, 1);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        report.failure_for("http://example.com", &CacheSource::Wayback),
        Some(&FetchErrorKind::NotFound)
    );
}

#[tokio::test]
async fn email_in_cached_body_is_reported() {
    let transport = CannedTransport::new().with(
        &wayback_url("http://example.com"),
        200,
        "contact me at a@b.com",
    );

    let report = run_recon(
        Arc::new(transport),
        &["http://example.com".to_string()],
        &[CacheSource::Wayback],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    let scan = report
        .scan_for("http://example.com", &CacheSource::Wayback)
        .expect("wayback fetch should succeed");
    assert_eq!(scan.get("Email Addresses"), Some(&["a@b.com".to_string()][..]));
}

#[tokio::test]
async fn partial_failure_keeps_successful_sources() {
    let transport = CannedTransport::new()
        .with(
            &wayback_url("http://example.com"),
            200,
            "api_key: abcd1234567890efghij",
        )
        .with(&google_url("http://example.com"), 404, "");

    let report = run_recon(
        Arc::new(transport),
        &["http://example.com".to_string()],
        &[CacheSource::Wayback, CacheSource::GoogleCache],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    let summary = report.summary();
    assert_eq!(summary.total_tasks, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);

    let scan = report
        .scan_for("http://example.com", &CacheSource::Wayback)
        .unwrap();
    assert_eq!(
        scan.get("API Keys"),
        Some(&["abcd1234567890efghij".to_string()][..])
    );
    assert_eq!(
        report.failure_for("http://example.com", &CacheSource::GoogleCache),
        Some(&FetchErrorKind::NotFound)
    );
}

#[tokio::test]
async fn zero_reachable_sources_still_completes() {
    let transport = CannedTransport::new();
    let targets: Vec<String> = (0..4)
        .map(|i| format!("http://example.com/page{}", i))
        .collect();

    let report = run_recon(
        Arc::new(transport),
        &targets,
        &[CacheSource::Wayback, CacheSource::GoogleCache],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    let summary = report.summary();
    assert_eq!(summary.total_tasks, 8);
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 8);
    for failure in &report.failures {
        assert!(matches!(failure.error, FetchErrorKind::NetworkError(_)));
    }
}

#[tokio::test]
async fn concurrency_limit_does_not_change_the_report() {
    fn transport() -> CannedTransport {
        let mut canned = CannedTransport::new();
        for i in 0..6 {
            let target = format!("http://example.com/page{}", i);
            canned = if i % 2 == 0 {
                canned.with(&wayback_url(&target), 200, "contact me at a@b.com")
            } else {
                canned.with(&wayback_url(&target), 404, "")
            };
        }
        canned
    }

    let targets: Vec<String> = (0..6)
        .map(|i| format!("http://example.com/page{}", i))
        .collect();
    let registry = PatternRegistry::defaults();

    let mut reports = Vec::new();
    for limit in [1, 10] {
        let options = ReconOptions {
            concurrency: limit,
            ..ReconOptions::default()
        };
        let report = run_recon(
            Arc::new(transport()),
            &targets,
            &[CacheSource::Wayback],
            &registry,
            &options,
        )
        .await;

        let mut findings = report.findings.clone();
        findings.sort_by(|a, b| a.task.target_url.cmp(&b.task.target_url));
        let mut failures = report.failures.clone();
        failures.sort_by(|a, b| a.task.target_url.cmp(&b.task.target_url));
        reports.push((findings, failures));
    }

    assert_eq!(reports[0], reports[1]);
}

#[tokio::test]
async fn custom_source_template_is_honored() {
    let transport = CannedTransport::new().with(
        "https://mirror.example/fetch?u=http://example.com",
        200,
        "password: topsecret99",
    );
    let custom = CacheSource::Custom("https://mirror.example/fetch?u={url}".to_string());

    let report = run_recon(
        Arc::new(transport),
        &["http://example.com".to_string()],
        &[custom.clone()],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    let scan = report.scan_for("http://example.com", &custom).unwrap();
    assert_eq!(scan.get("Passwords"), Some(&["topsecret99".to_string()][..]));
}

#[tokio::test]
async fn empty_cached_body_is_an_empty_content_failure() {
    let transport = CannedTransport::new().with(&wayback_url("http://example.com"), 200, "");

    let report = run_recon(
        Arc::new(transport),
        &["http://example.com".to_string()],
        &[CacheSource::Wayback],
        &PatternRegistry::defaults(),
        &ReconOptions::default(),
    )
    .await;

    assert!(report.findings.is_empty());
    assert_eq!(
        report.failure_for("http://example.com", &CacheSource::Wayback),
        Some(&FetchErrorKind::EmptyContent)
    );
}
