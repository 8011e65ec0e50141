use super::Report;

const RULE_WIDTH: usize = 60;

/// Human-readable report, one line per entry.
#[must_use]
pub fn render_report_lines(report: &Report) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let plan = &report.plan;
    let mut lines = vec![
        rule.clone(),
        "LOAD TEST COMPLETED".to_owned(),
        rule.clone(),
        format!("Target: {}", report.target),
        format!(
            "Plan: {} requests, {} workers x {} requests, {} users",
            plan.total_requests, plan.concurrency, plan.requests_per_worker, plan.user_pool
        ),
    ];
    if plan.dropped_requests > 0 {
        lines.push(format!(
            "Dropped: {} requests (total not divisible by concurrency)",
            plan.dropped_requests
        ));
    }

    lines.push(String::new());
    lines.push("RESULTS:".to_owned());
    lines.push(format!("  Duration: {:.2}s", report.duration_secs));
    lines.push(format!("  Total Requests: {}", report.total_completed));
    lines.push(format!(
        "  Success: {} ({:.1}%)",
        report.success, report.success_rate
    ));
    lines.push(format!("  Failed: {}", report.failed));

    if report.failed > 0 {
        lines.push(String::new());
        lines.push("  FAILURE BREAKDOWN:".to_owned());
        lines.push(format!(
            "    Reservation Failed (stock): {}",
            report.failures.reservation_failed
        ));
        lines.push(format!("    Timeout: {}", report.failures.timeout));
        lines.push(format!("    Other: {}", report.failures.other));

        if !report.top_errors.is_empty() {
            lines.push(String::new());
            lines.push("  ERROR TYPES:".to_owned());
            lines.extend(
                report
                    .top_errors
                    .iter()
                    .map(|entry| format!("    {}: {}", entry.kind, entry.count)),
            );
        }
    }

    lines.push(String::new());
    lines.push(format!("  THROUGHPUT: {:.2} req/sec", report.throughput));

    if report.total_completed > 0 {
        let latency = &report.latency;
        lines.push(String::new());
        lines.push("  LATENCY:".to_owned());
        lines.push(format!("    Avg: {:.0}ms", latency.avg_ms));
        lines.push(format!("    p50: {:.0}ms", latency.p50_ms));
        lines.push(format!("    p90: {:.0}ms", latency.p90_ms));
        lines.push(format!("    p95: {:.0}ms", latency.p95_ms));
        lines.push(format!("    p99: {:.0}ms", latency.p99_ms));
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("PERFORMANCE ASSESSMENT:".to_owned());
    lines.push(rule);
    lines.push(format!("  {}", report.tier.message()));

    if report.failures.reservation_failed > 0 {
        lines.push(String::new());
        lines.push(format!(
            "  NOTE: {} reservation failures detected.",
            report.failures.reservation_failed
        ));
        lines.push("    Expected once stock is depleted during the run;".to_owned());
        lines.push("    the reservation step rejected orders instead of overselling.".to_owned());
    }

    lines
}

pub fn print_report(report: &Report) {
    for line in render_report_lines(report) {
        println!("{}", line);
    }
}
