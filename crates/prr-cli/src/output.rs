//! Output formatting for the CLI.

use crate::commands::check::CheckReport;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use prr_domain::{project, Assignment, Projection};
use prr_engine::Solution;
use serde_json::{json, Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Result of solving one definition file.
#[derive(Debug)]
pub struct FileOutcome {
    /// File the definitions came from
    pub file: String,

    /// Solution or the error that stopped it
    pub result: prr_engine::Result<Solution>,
}

impl FileOutcome {
    /// Whether the file was solved
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of solving one or more files.
    pub fn format_outcomes(&self, outcomes: &[FileOutcome]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outcomes_json(outcomes),
            OutputFormat::Table => Ok(self.format_outcomes_table(outcomes)),
            OutputFormat::Quiet => Ok(self.format_outcomes_quiet(outcomes)),
        }
    }

    fn format_outcomes_json(&self, outcomes: &[FileOutcome]) -> Result<String> {
        let json_outcomes: Vec<Value> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(solution) => {
                    let mut entry = json!({
                        "file": outcome.file,
                        "status": "stable",
                        "rounds": solution.rounds(),
                        "changing_rounds": solution.changing_rounds(),
                        "max_changes": solution.metrics.max_changes(),
                        "values": values_json(&solution.assignment),
                        "intervals": intervals_json(&solution.projection()),
                        "elapsed_micros": solution.metrics.elapsed_micros as u64,
                    });
                    if !solution.trace.is_empty() {
                        entry["trace"] = solution.trace.iter().map(values_json).collect();
                    }
                    entry
                }
                Err(e) => {
                    let status = if e.is_construction_error() { "invalid" } else { "error" };
                    let mut entry = json!({
                        "file": outcome.file,
                        "status": status,
                        "error": e.to_string(),
                    });
                    if let Some(last) = e.last_assignment() {
                        entry["last"] = values_json(last);
                    }
                    entry
                }
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_outcomes)?)
    }

    fn format_outcomes_table(&self, outcomes: &[FileOutcome]) -> String {
        let sections: Vec<String> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(solution) => {
                    let mut lines = vec![
                        self.success(&format!(
                            "{}: stable after {} round(s), {} changing, at most {} change(s) per sentence",
                            outcome.file,
                            solution.rounds(),
                            solution.changing_rounds(),
                            solution.metrics.max_changes()
                        )),
                        self.format_values_table(&solution.assignment),
                    ];
                    if !solution.trace.is_empty() {
                        lines.push(self.info("Trace:"));
                        lines.push(self.format_trace(&solution.trace));
                        lines.push(solution.metrics.summary());
                    }
                    lines.join("\n")
                }
                Err(e) => {
                    let mut lines = vec![self.error(&format!("{}: {}", outcome.file, e))];
                    if let Some(last) = e.last_assignment() {
                        lines.push(self.warning("Last assignment before giving up:"));
                        lines.push(self.format_values_table(last));
                    }
                    lines.join("\n")
                }
            })
            .collect();

        sections.join("\n\n")
    }

    fn format_outcomes_quiet(&self, outcomes: &[FileOutcome]) -> String {
        let prefix_files = outcomes.len() > 1;
        let mut lines = Vec::new();
        for outcome in outcomes {
            if let Ok(solution) = &outcome.result {
                for (name, value) in solution.assignment.iter() {
                    if prefix_files {
                        lines.push(format!("{}:{}={}", outcome.file, name, value));
                    } else {
                        lines.push(format!("{}={}", name, value));
                    }
                }
            }
        }
        lines.join("\n")
    }

    /// Format an assignment with the interval of every value.
    pub fn format_values_table(&self, assignment: &Assignment) -> String {
        if assignment.is_empty() {
            return self.colorize("No sentences.", "yellow");
        }

        let projection = project(assignment);
        let mut builder = Builder::default();
        builder.push_record(["Sentence", "Value", "Interval"]);

        for (name, value) in assignment.iter() {
            let interval = projection
                .get(name)
                .map(|i| format!("[{:.1}, {:.1}]", i.lower, i.upper))
                .unwrap_or_default();
            builder.push_record([name.to_string(), value.to_string(), interval]);
        }

        self.render(builder)
    }

    /// Format a trace, one row per assignment.
    pub fn format_trace(&self, trace: &[Assignment]) -> String {
        let Some(first) = trace.first() else {
            return String::new();
        };

        let mut builder = Builder::default();
        let mut header = vec!["Round".to_string()];
        header.extend(first.names().map(str::to_string));
        builder.push_record(header);

        for (round, assignment) in trace.iter().enumerate() {
            let mut row = vec![round.to_string()];
            row.extend(assignment.iter().map(|(_, value)| value.to_string()));
            builder.push_record(row);
        }

        self.render(builder)
    }

    /// Format a projection.
    pub fn format_projection(&self, projection: &Projection) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&intervals_json(projection))?),
            OutputFormat::Quiet => Ok(projection
                .iter()
                .map(|(name, i)| format!("{} {} {}", name, i.lower, i.upper))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if projection.is_empty() {
                    return Ok(self.colorize("No sentences.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Sentence", "Lower", "Upper", "Midpoint", "Width"]);
                for (name, interval) in projection.iter() {
                    builder.push_record([
                        name.to_string(),
                        format!("{:.2}", interval.lower),
                        format!("{:.2}", interval.upper),
                        format!("{:.2}", interval.midpoint()),
                        format!("{:.2}", interval.width()),
                    ]);
                }

                let mut output = self.render(builder);
                if let Some(hull) = projection.hull() {
                    output.push('\n');
                    output.push_str(&self.info(&format!(
                        "Overall: [{:.2}, {:.2}]",
                        hull.lower, hull.upper
                    )));
                }
                Ok(output)
            }
        }
    }

    /// Format a structural report of a definition file.
    pub fn format_check(&self, report: &CheckReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.sentences.to_string()),
            OutputFormat::Table => {
                let self_referential = if report.self_referential.is_empty() {
                    "none".to_string()
                } else {
                    report.self_referential.join(", ")
                };
                let cycles = if report.cycles.is_empty() {
                    "none".to_string()
                } else {
                    report
                        .cycles
                        .iter()
                        .map(|cycle| format!("{{{}}}", cycle.join(", ")))
                        .collect::<Vec<_>>()
                        .join(" ")
                };

                let mut builder = Builder::default();
                builder.push_record(["Property", "Value"]);
                builder.push_record(["Sentences".to_string(), report.sentences.to_string()]);
                builder.push_record(["Self-referential".to_string(), self_referential]);
                builder.push_record(["Cycles".to_string(), cycles]);
                builder.push_record(["Acyclic".to_string(), yes_no(report.acyclic).to_string()]);
                builder.push_record(["Formula nodes".to_string(), report.formula_nodes.to_string()]);
                builder.push_record([
                    "Convergence bound".to_string(),
                    format!("{} rounds", report.convergence_bound),
                ]);

                Ok(format!(
                    "{}\n{}",
                    self.success(&format!("{}: valid", report.file)),
                    self.render(builder)
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn values_json(assignment: &Assignment) -> Value {
    Value::Object(
        assignment
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value.as_str())))
            .collect::<Map<_, _>>(),
    )
}

fn intervals_json(projection: &Projection) -> Value {
    Value::Object(
        projection
            .iter()
            .map(|(name, i)| (name.to_string(), json!([i.lower, i.upper])))
            .collect::<Map<_, _>>(),
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
