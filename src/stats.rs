//! Statistics tracking for parsed access-log records.
//!
//! This module provides structures for tracking various metrics about
//! parsed log lines, including counts, response-time and reply-size
//! distributions, and breakdowns by request method, HTTP status, and
//! client address.

use hdrhistogram::Histogram;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::engine::str_right;
use crate::ipv4;
use crate::record::LogRecord;

/// Thread-safe statistics collector for parsed log records.
#[derive(Debug)]
pub struct ParseStats {
    /// Total number of lines seen
    pub total_lines: AtomicU64,

    /// Total number of lines parsed successfully
    pub total_records: AtomicU64,

    /// Total number of lines that failed to parse
    pub parse_failures: AtomicU64,

    /// Total bytes of raw input processed
    pub bytes_processed: AtomicU64,

    /// Histogram of response times in milliseconds
    response_time_histogram: RwLock<Histogram<u64>>,

    /// Histogram of reply sizes in bytes
    reply_size_histogram: RwLock<Histogram<u64>>,

    /// Records per request method
    records_by_method: RwLock<HashMap<String, u64>>,

    /// Records per HTTP status code
    records_by_status: RwLock<HashMap<u16, u64>>,

    /// Top client source addresses
    top_clients: RwLock<HashMap<u32, u64>>,

    /// When stats collection started
    start_time: Instant,
}

impl ParseStats {
    /// Create a new statistics collector.
    pub fn new() -> Self {
        Self {
            total_lines: AtomicU64::new(0),
            total_records: AtomicU64::new(0),
            parse_failures: AtomicU64::new(0),
            bytes_processed: AtomicU64::new(0),
            // Response times: 1ms to 1 hour, 3 significant figures
            response_time_histogram: RwLock::new(
                Histogram::new_with_bounds(1, 3_600_000, 3)
                    .expect("Failed to create response-time histogram"),
            ),
            // Reply sizes: 1 byte to 1 GiB, 3 significant figures
            reply_size_histogram: RwLock::new(
                Histogram::new_with_bounds(1, 1 << 30, 3)
                    .expect("Failed to create reply-size histogram"),
            ),
            records_by_method: RwLock::new(HashMap::new()),
            records_by_status: RwLock::new(HashMap::new()),
            top_clients: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record a successfully parsed log record.
    pub fn record(&self, record: &LogRecord) {
        self.total_lines.fetch_add(1, Ordering::Relaxed);
        self.total_records.fetch_add(1, Ordering::Relaxed);

        // Only the squid format carries a response time.
        if record.response_time > 0
            && let Ok(mut hist) = self.response_time_histogram.write()
        {
            let _ = hist.record(record.response_time as u64);
        }

        if record.total_size_reply > 0
            && let Ok(mut hist) = self.reply_size_histogram.write()
        {
            let _ = hist.record(record.total_size_reply as u64);
        }

        if !record.req_method.is_empty()
            && let Ok(mut map) = self.records_by_method.write()
        {
            *map.entry(record.req_method.clone()).or_insert(0) += 1;
        }

        if let Some(status) = Self::status_of(record)
            && let Ok(mut map) = self.records_by_status.write()
        {
            *map.entry(status).or_insert(0) += 1;
        }

        if let Ok(mut map) = self.top_clients.write() {
            *map.entry(record.cli_src_ip_addr).or_insert(0) += 1;
        }
    }

    /// Record a line that failed to parse.
    pub fn record_parse_failure(&self) {
        self.total_lines.fetch_add(1, Ordering::Relaxed);
        self.parse_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record bytes processed.
    pub fn record_bytes(&self, bytes: u64) {
        self.bytes_processed.fetch_add(bytes, Ordering::Relaxed);
    }

    /// The HTTP status of a record. Common/combined carry it directly;
    /// squid encodes it after the `/` in the request-status field.
    fn status_of(record: &LogRecord) -> Option<u16> {
        if record.http_status > 0 {
            return u16::try_from(record.http_status).ok();
        }
        str_right(&record.req_status_hier_status, '/')
            .parse()
            .ok()
    }

    /// Get the elapsed time since stats collection started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get the current lines per second rate.
    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_lines.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Generate a summary report.
    pub fn summary(&self) -> StatsSummary {
        let elapsed = self.elapsed();
        let lines = self.total_lines.load(Ordering::Relaxed);
        let records = self.total_records.load(Ordering::Relaxed);
        let failures = self.parse_failures.load(Ordering::Relaxed);
        let bytes = self.bytes_processed.load(Ordering::Relaxed);

        let response_time_percentiles = self
            .response_time_histogram
            .read()
            .ok()
            .filter(|h| !h.is_empty())
            .map(|h| HistogramPercentiles {
                p50: h.value_at_quantile(0.50),
                p90: h.value_at_quantile(0.90),
                p99: h.value_at_quantile(0.99),
                min: h.min(),
                max: h.max(),
                mean: h.mean(),
            });

        let reply_size_percentiles = self
            .reply_size_histogram
            .read()
            .ok()
            .filter(|h| !h.is_empty())
            .map(|h| HistogramPercentiles {
                p50: h.value_at_quantile(0.50),
                p90: h.value_at_quantile(0.90),
                p99: h.value_at_quantile(0.99),
                min: h.min(),
                max: h.max(),
                mean: h.mean(),
            });

        let records_by_method = self
            .records_by_method
            .read()
            .map(|m| m.clone())
            .unwrap_or_default();

        let records_by_status = self
            .records_by_status
            .read()
            .map(|m| m.clone())
            .unwrap_or_default();

        // Top 10 client addresses, rendered dotted-quad.
        let top_clients = self
            .top_clients
            .read()
            .map(|m| {
                let mut vec: Vec<_> = m.iter().map(|(k, v)| (ipv4::ltoip(*k), *v)).collect();
                vec.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                vec.truncate(10);
                vec
            })
            .unwrap_or_default();

        StatsSummary {
            elapsed_secs: elapsed.as_secs_f64(),
            total_lines: lines,
            total_records: records,
            parse_failures: failures,
            bytes_processed: bytes,
            lines_per_second: self.lines_per_second(),
            response_time_percentiles,
            reply_size_percentiles,
            records_by_method,
            records_by_status,
            top_clients,
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Percentile values from a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramPercentiles {
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
}

/// Summary of collected statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub elapsed_secs: f64,
    pub total_lines: u64,
    pub total_records: u64,
    pub parse_failures: u64,
    pub bytes_processed: u64,
    pub lines_per_second: f64,
    pub response_time_percentiles: Option<HistogramPercentiles>,
    pub reply_size_percentiles: Option<HistogramPercentiles>,
    pub records_by_method: HashMap<String, u64>,
    pub records_by_status: HashMap<u16, u64>,
    pub top_clients: Vec<(String, u64)>,
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "═══════════════════════════════════════════════════════")?;
        writeln!(f, "                ACCESS LOG STATISTICS")?;
        writeln!(f, "═══════════════════════════════════════════════════════")?;
        writeln!(f)?;
        writeln!(f, "Runtime: {:.1}s", self.elapsed_secs)?;
        writeln!(f, "Total lines: {}", self.total_lines)?;
        writeln!(
            f,
            "Parsed records: {} ({:.1}%)",
            self.total_records,
            if self.total_lines > 0 {
                self.total_records as f64 / self.total_lines as f64 * 100.0
            } else {
                0.0
            }
        )?;
        writeln!(f, "Parse failures: {}", self.parse_failures)?;
        writeln!(f, "Bytes processed: {} KB", self.bytes_processed / 1024)?;
        writeln!(f, "Rate: {:.1} lines/sec", self.lines_per_second)?;
        writeln!(f)?;

        if let Some(ref p) = self.response_time_percentiles {
            writeln!(f, "Response Time Distribution (ms):")?;
            writeln!(f, "  Min: {}, Max: {}, Mean: {:.1}", p.min, p.max, p.mean)?;
            writeln!(f, "  P50: {}, P90: {}, P99: {}", p.p50, p.p90, p.p99)?;
            writeln!(f)?;
        }

        if let Some(ref p) = self.reply_size_percentiles {
            writeln!(f, "Reply Size Distribution (bytes):")?;
            writeln!(f, "  Min: {}, Max: {}, Mean: {:.1}", p.min, p.max, p.mean)?;
            writeln!(f, "  P50: {}, P90: {}, P99: {}", p.p50, p.p90, p.p99)?;
            writeln!(f)?;
        }

        if !self.records_by_method.is_empty() {
            writeln!(f, "Records by Method:")?;
            let mut methods: Vec<_> = self.records_by_method.iter().collect();
            methods.sort_by(|a, b| b.1.cmp(a.1));
            for (method, count) in methods {
                writeln!(f, "  {}: {}", method, count)?;
            }
            writeln!(f)?;
        }

        if !self.records_by_status.is_empty() {
            writeln!(f, "Records by HTTP Status:")?;
            let mut statuses: Vec<_> = self.records_by_status.iter().collect();
            statuses.sort_by(|a, b| b.1.cmp(a.1));
            for (status, count) in statuses {
                writeln!(f, "  {}: {}", status, count)?;
            }
            writeln!(f)?;
        }

        if !self.top_clients.is_empty() {
            writeln!(f, "Top 10 Clients:")?;
            for (i, (client, count)) in self.top_clients.iter().enumerate() {
                writeln!(f, "  {}. {}: {}", i + 1, client, count)?;
            }
        }

        Ok(())
    }
}
