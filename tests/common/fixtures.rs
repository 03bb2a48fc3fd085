//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative lines for one
//! input format. The HIGH_VOLUME corpus is generated so throughput paths can
//! be exercised without checked-in files.

use logfold::core::patterns::{syslog_for_year, Extracted, RegexPattern};
use logfold::core::ParseError;

/// Year pinned onto syslog timestamps in harnesses.
pub const SYSLOG_YEAR: i32 = 2026;

/// JSON-object lines using each of the reserved key spellings.
pub const CORPUS_JSON: &[&str] = &[
    r#"{"level":"error","message":"Connection refused","timestamp":"2026-02-06T14:12:01Z","source":"auth-service","requestId":"req-abc123"}"#,
    r#"{"severity":"WARNING","msg":"disk usage 91%","hostname":"db-01"}"#,
    r#"{"loglevel":"debug","msg":"cache miss","time":"2026-02-06 14:12:02","logger":"cache","key":"user:42","ttl":300}"#,
    r#"{"level":"crit","error":"out of memory","ts":1770387121000,"service":"worker","rss_mb":16384}"#,
    r#"{"@timestamp":"2026-02-06T14:12:04.250+01:00","level":"INFO","message":"payment accepted","service":"billing","amount":{"value":12.5,"currency":"EUR"}}"#,
];

/// RFC 3164 syslog lines, with and without a pid.
pub const CORPUS_SYSLOG: &[&str] = &[
    "Feb  6 14:12:01 web-01 sshd[4512]: Accepted publickey for deploy",
    "Feb  6 14:12:02 web-01 nginx: GET /index.html",
    "Feb 16 03:00:00 db-01 CRON[991]: (root) CMD (run-parts /etc/cron.daily)",
    "Dec 31 23:59:59 edge.example.com kernel: eth0 link down",
];

/// Common and combined log format access lines.
pub const CORPUS_CLF: &[&str] = &[
    r#"192.168.1.1 - admin [06/Feb/2026:14:12:01 +0000] "GET /api/health HTTP/1.1" 200 1234"#,
    r#"10.0.0.7 - - [06/Feb/2026:14:12:02 +0000] "POST /api/login HTTP/1.1" 401 87"#,
    r#"10.0.0.8 - - [06/Feb/2026:14:12:03 +0000] "GET /checkout HTTP/2.0" 502 - "https://shop.example/" "Mozilla/5.0""#,
];

/// Timestamp-prefixed application lines.
pub const CORPUS_GENERIC: &[&str] = &[
    "2026-02-06T14:12:01.123Z [ERROR] auth-service: Connection refused",
    "2026-02-06 14:12:02 WARN disk almost full",
    "2026-02-06T14:12:03+02:00 [notice] scheduler: job queued",
    "2026-02-06 14:12:04 DEBUG worker-1: polling",
];

/// Lines no strategy recognises.
pub const CORPUS_UNKNOWN: &[&str] = &[
    "ERROR: NullPointerException at com.example.App.handle(App.java:42)",
    "10:00:05.123 [main] DEBUG o.s.w.s.DispatcherServlet - Initializing Servlet",
    "GET /api/v1/users 200 47ms",
    "{this is not json",
];

/// One line of every format, in a fixed order, with the expected tag.
pub const CORPUS_MIXED: &[(&str, &str)] = &[
    (r#"{"level":"info","message":"api-gateway started"}"#, "json"),
    ("Feb  6 14:12:01 web-01 sshd[4512]: Accepted publickey for deploy", "syslog"),
    (r#"192.168.1.1 - admin [06/Feb/2026:14:12:01 +0000] "GET /api/health HTTP/1.1" 200 1234"#, "clf"),
    ("2026-02-06T14:12:01.123Z [ERROR] auth-service: Connection refused", "generic"),
    ("plain words without structure", "unknown"),
];

/// Generate `n` synthetic lines cycling through the JSON, syslog, CLF and
/// generic shapes.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 4 {
            0 => format!(r#"{{"level":"info","message":"line {i}","seq":{i},"service":"api"}}"#),
            1 => format!("Feb  6 14:{:02}:{:02} web-0{} app[{i}]: line {i}", i / 60 % 60, i % 60, i % 3),
            2 => format!(
                r#"10.0.0.{} - - [06/Feb/2026:14:12:01 +0000] "GET /items/{i} HTTP/1.1" {} 512"#,
                i % 255,
                if i % 10 == 2 { 500 } else { 200 }
            ),
            _ => format!("2026-02-06T14:12:01Z [WARN] worker-{}: line {i}", i % 5),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Custom pattern fixtures
// ---------------------------------------------------------------------------

/// Prefix matched by [`failing_pattern`].
pub const FAILING_PREFIX: &str = "REJECT ";
/// Prefix matched by [`panicking_pattern`].
pub const PANICKING_PREFIX: &str = "EXPLODE ";

/// A pattern whose extractor always reports an error.
pub fn failing_pattern() -> RegexPattern {
    RegexPattern::compile("reject", r"^REJECT (?P<body>.*)$", |_| {
        Err(ParseError::Extraction {
            pattern: "reject".to_string(),
            reason: "payload refused".to_string(),
        })
    })
    .expect("fixture regex is valid")
}

/// A pattern whose extractor panics.
pub fn panicking_pattern() -> RegexPattern {
    RegexPattern::compile("explode", r"^EXPLODE (?P<body>.*)$", |caps| -> Result<Extracted, ParseError> {
        let body = caps.name("body").map(|m| m.as_str()).unwrap_or_default();
        panic!("extractor blew up on {body:?}")
    })
    .expect("fixture regex is valid")
}

/// Built-in patterns (syslog pinned to [`SYSLOG_YEAR`]) followed by the two
/// misbehaving fixtures.
pub fn misbehaving_registry() -> logfold::PatternRegistry {
    logfold::PatternRegistry::new(vec![
        Box::new(syslog_for_year(SYSLOG_YEAR)),
        Box::new(logfold::core::patterns::clf()),
        Box::new(logfold::core::patterns::generic()),
    ])
    .with_pattern(failing_pattern())
    .with_pattern(panicking_pattern())
}

/// Built-in patterns with the syslog year pinned.
pub fn pinned_registry() -> logfold::PatternRegistry {
    logfold::PatternRegistry::new(vec![
        Box::new(syslog_for_year(SYSLOG_YEAR)),
        Box::new(logfold::core::patterns::clf()),
        Box::new(logfold::core::patterns::generic()),
    ])
}
