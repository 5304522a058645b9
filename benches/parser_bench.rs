//! Benchmarks for the access-log parser.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use squid_log_parser::engine::{LogParser, collapse_whitespace};
use squid_log_parser::record::LogFormat;

const SQUID_LINE: &str = "1157689312.587 320 65.65.65.65 TCP_MISS/200 16938 GET \
                          http://example.com/path/to/page - DIRECT/10.0.0.1 text/html";
const COMMON_LINE: &str = "172.17.0.2 - frank [10/Oct/2000:13:55:36 -0700] \
                           \"GET /apache_pb.gif HTTP/1.0\" 200 2326 TCP_MISS:HIER_DIRECT";
const COMBINED_LINE: &str = "10.0.0.5 - alice [10/Oct/2000:13:55:36 -0700] \
                             \"GET http://example.com/x HTTP/1.1\" 200 512 \
                             \"http://ref.example.com/\" \"Mozilla/5.0 (X11; Linux)\" TCP_HIT:NONE";
const REFERRER_LINE: &str =
    "1157689312.049 192.168.1.7 http://ref.example.org/ http://example.com/page";
const USERAGENT_LINE: &str = "10.1.2.3 [10/Oct/2000:13:55:36 -0700] \"curl/8.0.1\"";

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));

    let formats = [
        ("squid", LogFormat::Squid, SQUID_LINE),
        ("common", LogFormat::Common, COMMON_LINE),
        ("combined", LogFormat::Combined, COMBINED_LINE),
        ("referrer", LogFormat::Referrer, REFERRER_LINE),
        ("useragent", LogFormat::UserAgent, USERAGENT_LINE),
    ];

    for (name, format, line) in formats {
        group.bench_function(name, |b| {
            let mut parser = LogParser::new(format);
            b.iter(|| {
                parser.append(black_box(line));
                parser.clear();
            })
        });
    }

    group.finish();
}

fn bench_collapse_whitespace(c: &mut Criterion) {
    let mut group = c.benchmark_group("collapse_whitespace");

    let clean = SQUID_LINE;
    let messy = "1157689312.587   320  65.65.65.65\tTCP_MISS/200  16938   GET \
                 http://example.com/    -  DIRECT/10.0.0.1   text/html  ";

    group.bench_function("clean", |b| b.iter(|| collapse_whitespace(black_box(clean))));
    group.bench_function("messy", |b| b.iter(|| collapse_whitespace(black_box(messy))));

    group.finish();
}

fn bench_mixed_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_input");

    // Valid lines interleaved with garbage, as a real log tail looks.
    let lines = [
        SQUID_LINE,
        "not a log line at all",
        SQUID_LINE,
        "",
        SQUID_LINE,
    ];

    group.throughput(Throughput::Elements(lines.len() as u64));
    group.bench_function("squid", |b| {
        let mut parser = LogParser::new(LogFormat::Squid);
        b.iter(|| {
            for line in &lines {
                parser.append(black_box(line));
            }
            parser.clear();
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_append,
    bench_collapse_whitespace,
    bench_mixed_input
);
criterion_main!(benches);
