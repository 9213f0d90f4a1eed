use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{
    HumanBytes, HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle,
};
use url::Url;

pub struct Progress {
    enabled: bool,
    start: Instant,
    max_concurrency: usize,

    mp: Option<MultiProgress>,
    stage: ProgressBar,
    projects: ProgressBar,
    downloads: ProgressBar,

    projects_total: AtomicU64,
    projects_done: AtomicU64,

    asset_requests_total: AtomicU64,
    asset_requests_unique: AtomicU64,
    asset_requests_cache_hit: AtomicU64,

    http_in_flight: AtomicU64,
    http_done: AtomicU64,
    http_bytes: AtomicU64,

    last_http_label: Mutex<String>,
}

impl Progress {
    pub fn new(enabled: bool, max_concurrency: usize) -> Arc<Self> {
        let (mp, stage, projects, downloads) = if enabled {
            let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

            let stage = mp.add(ProgressBar::new_spinner());
            stage.set_style(spinner_style());
            stage.enable_steady_tick(Duration::from_millis(80));
            stage.set_message("starting");

            let projects = mp.add(ProgressBar::new(0));
            if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                projects.set_style(style.progress_chars("##-"));
            }
            projects.set_message("projects");

            let downloads = mp.add(ProgressBar::new_spinner());
            downloads.set_style(spinner_style());
            downloads.enable_steady_tick(Duration::from_millis(120));
            downloads.set_message("downloads");

            (Some(mp), stage, projects, downloads)
        } else {
            (
                None,
                ProgressBar::hidden(),
                ProgressBar::hidden(),
                ProgressBar::hidden(),
            )
        };

        Arc::new(Self {
            enabled,
            start: Instant::now(),
            max_concurrency: max_concurrency.max(1),
            mp,
            stage,
            projects,
            downloads,
            projects_total: AtomicU64::new(0),
            projects_done: AtomicU64::new(0),
            asset_requests_total: AtomicU64::new(0),
            asset_requests_unique: AtomicU64::new(0),
            asset_requests_cache_hit: AtomicU64::new(0),
            http_in_flight: AtomicU64::new(0),
            http_done: AtomicU64::new(0),
            http_bytes: AtomicU64::new(0),
            last_http_label: Mutex::new(String::new()),
        })
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        let msg = msg.into();
        tracing::debug!(stage = %msg, "render stage");
        if self.enabled {
            self.stage.set_message(msg);
        }
    }

    pub fn set_projects_total(&self, total: usize) {
        self.projects_total.store(total as u64, Ordering::Relaxed);
        if self.enabled {
            self.projects.set_length(total as u64);
        }
    }

    pub fn project_done(&self, title: &str) {
        self.projects_done.fetch_add(1, Ordering::Relaxed);
        if self.enabled {
            self.projects.inc(1);
            self.projects.set_message(title.to_string());
        }
    }

    pub fn asset_request(&self, is_unique: bool) {
        self.asset_requests_total.fetch_add(1, Ordering::Relaxed);
        if is_unique {
            self.asset_requests_unique.fetch_add(1, Ordering::Relaxed);
        } else {
            self.asset_requests_cache_hit.fetch_add(1, Ordering::Relaxed);
        }
        self.refresh_downloads();
    }

    pub fn http_start(&self, url: &Url) {
        self.http_in_flight.fetch_add(1, Ordering::Relaxed);
        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {url}");
            }
            self.refresh_downloads();
        }
    }

    pub fn http_throttled(&self, url: &Url, status: u16, wait: Duration) {
        if !self.enabled {
            return;
        }
        if let Ok(mut last) = self.last_http_label.lock() {
            *last = format!("GET {url} throttled {status} wait {}ms", wait.as_millis());
        }
        self.refresh_downloads();
    }

    pub fn http_ok(&self, url: &Url, bytes: usize) {
        self.http_in_flight.fetch_sub(1, Ordering::Relaxed);
        self.http_done.fetch_add(1, Ordering::Relaxed);
        self.http_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {url} ok {bytes}B");
            }
            self.refresh_downloads();
        }
    }

    pub fn http_err(&self, url: &Url) {
        self.http_in_flight.fetch_sub(1, Ordering::Relaxed);
        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {url} failed");
            }
            self.refresh_downloads();
        }
    }

    pub fn finish(&self) {
        tracing::info!(
            projects = self.projects_done.load(Ordering::Relaxed),
            downloads = self.http_done.load(Ordering::Relaxed),
            bytes = self.http_bytes.load(Ordering::Relaxed),
            elapsed_ms = self.start.elapsed().as_millis() as u64,
            "render finished"
        );
        if !self.enabled {
            return;
        }
        self.refresh_downloads();
        self.stage.finish_with_message("done");
        self.projects.finish_and_clear();
        self.downloads.finish_and_clear();
        if let Some(mp) = &self.mp {
            let _ = mp.println(format!("Done in {}", HumanDuration(self.start.elapsed())));
        }
    }

    fn refresh_downloads(&self) {
        if !self.enabled {
            return;
        }

        let in_flight = self.http_in_flight.load(Ordering::Relaxed);
        let done = self.http_done.load(Ordering::Relaxed);
        let bytes = self.http_bytes.load(Ordering::Relaxed);
        let asset_total = self.asset_requests_total.load(Ordering::Relaxed);
        let asset_unique = self.asset_requests_unique.load(Ordering::Relaxed);
        let asset_hit = self.asset_requests_cache_hit.load(Ordering::Relaxed);
        let projects_done = self.projects_done.load(Ordering::Relaxed);
        let projects_total = self.projects_total.load(Ordering::Relaxed);

        let elapsed = self.start.elapsed().as_secs_f64().max(0.001);
        let rate = (bytes as f64 / elapsed) as u64;

        let last = self
            .last_http_label
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        self.downloads.set_message(format!(
            "HTTP: done {done} | in-flight {in_flight}/{max} | bytes {bytes} ({rate}/s) | images req {asset_total} uniq {asset_unique} hit {asset_hit} | projects {projects_done}/{projects_total} | {last}",
            max = self.max_concurrency,
            bytes = HumanBytes(bytes),
            rate = HumanBytes(rate),
        ));
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
