//! Prometheus text exposition format.
//!
//! Renders a metrics snapshot into the Prometheus text exposition format
//! for scraping by a Prometheus server or compatible agent. Rendering is a
//! pure function of the snapshot: identical snapshots render to identical
//! bytes.

use crate::kind::ErrorKind;
use crate::recorder::MetricsSnapshot;

/// Content type reported to the polling collector; identifies the text
/// exposition format version. Constant for the process lifetime.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render a metrics snapshot into Prometheus text format.
///
/// Produces one gauge (availability) and two counter families (throughput,
/// per-class errors). Every error class appears every time, including
/// classes still at zero.
pub fn render_prometheus(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::new();

    out.push_str("# HELP graphql_server_availability Schema validity of the active schema (1 = valid).\n");
    out.push_str("# TYPE graphql_server_availability gauge\n");
    out.push_str(&format!(
        "graphql_server_availability {}\n",
        snapshot.availability
    ));

    out.push_str("# HELP graphql_server_request_throughput Total handled requests, success or failure.\n");
    out.push_str("# TYPE graphql_server_request_throughput counter\n");
    out.push_str(&format!(
        "graphql_server_request_throughput {}\n",
        snapshot.request_throughput
    ));

    out.push_str("# HELP graphql_server_errors Requests classified per error class.\n");
    out.push_str("# TYPE graphql_server_errors counter\n");
    for kind in ErrorKind::ALL {
        out.push_str(&format!(
            "graphql_server_errors{{errorClass=\"{}\"}} {}\n",
            kind.label(),
            snapshot.error_count(kind)
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            availability: 1,
            request_throughput: 0,
            errors: [0; 8],
        }
    }

    #[test]
    fn render_fresh_state() {
        let output = render_prometheus(&zero_snapshot());

        assert!(output.contains("graphql_server_availability 1"));
        assert!(output.contains("graphql_server_request_throughput 0"));
        // Every class is present even at zero.
        for kind in ErrorKind::ALL {
            assert!(
                output.contains(&format!(
                    "graphql_server_errors{{errorClass=\"{}\"}} 0",
                    kind.label()
                )),
                "missing zero-valued series for {kind}"
            );
        }
    }

    #[test]
    fn render_reflects_counts() {
        let mut snapshot = zero_snapshot();
        snapshot.availability = 0;
        snapshot.request_throughput = 42;
        snapshot.errors[ErrorKind::Fetch.index()] = 3;

        let output = render_prometheus(&snapshot);
        assert!(output.contains("graphql_server_availability 0"));
        assert!(output.contains("graphql_server_request_throughput 42"));
        assert!(output.contains("graphql_server_errors{errorClass=\"fetch-error\"} 3"));
        assert!(output.contains("graphql_server_errors{errorClass=\"graphql-error\"} 0"));
    }

    #[test]
    fn render_is_idempotent() {
        let snapshot = zero_snapshot();
        assert_eq!(render_prometheus(&snapshot), render_prometheus(&snapshot));
    }

    #[test]
    fn render_has_help_and_type_per_family() {
        let output = render_prometheus(&zero_snapshot());
        for family in [
            "graphql_server_availability",
            "graphql_server_request_throughput",
            "graphql_server_errors",
        ] {
            assert!(output.contains(&format!("# HELP {family}")));
            assert!(output.contains(&format!("# TYPE {family}")));
        }
    }

    #[test]
    fn render_lines_are_well_formed() {
        let output = render_prometheus(&zero_snapshot());
        for line in output.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // metric_name[{labels}] value
            let (name, value) = line.rsplit_once(' ').expect("line should have a value");
            assert!(!name.is_empty());
            assert!(value.parse::<u64>().is_ok(), "non-integer value: {line}");
        }
    }
}
