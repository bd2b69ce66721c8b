use crate::types::ConformanceReport;
use std::fmt;

/// Text report formatter for a conformance report
pub struct TextReport<'a> {
    report: &'a ConformanceReport,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(report: &'a ConformanceReport) -> Self {
        Self { report }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let failed = report.nonconformities().len();

        writeln!(f, "Conformance Report")?;
        writeln!(f, "==================")?;
        writeln!(f)?;
        if let Some(criteria) = &report.criteria {
            match report.timepoint {
                Some(timepoint) => writeln!(f, "Criteria:  {} ({})", criteria, timepoint)?,
                None => writeln!(f, "Criteria:  {}", criteria)?,
            }
        }
        writeln!(f, "Rules:     {}", report.len())?;
        writeln!(f, "Failed:    {}", failed)?;
        writeln!(
            f,
            "Status:    {}",
            if report.passed() { "conformant" } else { "nonconformant" }
        )?;
        writeln!(f)?;

        for outcome in &report.outcomes {
            let result = &outcome.result;
            if result.passed {
                writeln!(f, "[PASS] {}", outcome.criterion)?;
                continue;
            }

            writeln!(
                f,
                "[FAIL] {}: {}",
                outcome.criterion,
                result.message.as_deref().unwrap_or("")
            )?;
            for measurement in &result.measurements {
                let location = if measurement.location.is_empty() {
                    "unknown location"
                } else {
                    measurement.location.as_str()
                };
                writeln!(f, "  - #{} ({})", measurement.measurement_number, location)?;
            }
        }

        let by_measurement = report.nonconformities_by_measurement();
        if !by_measurement.is_empty() {
            writeln!(f)?;
            writeln!(f, "By Measurement")?;
            writeln!(f, "--------------")?;
            for (number, messages) in &by_measurement {
                writeln!(f, "#{}:", number)?;
                for message in messages {
                    writeln!(f, "  {}", message)?;
                }
            }
        }

        Ok(())
    }
}
