//! Display formatting for CLI output
//!
//! Provides:
//! - One-line step/success/warning markers
//! - The pod status table printed by `deployer status`

use console::{Style, style};
use deployer_kube::PodSummary;
use std::io::{self, Write};

/// `→ message`
pub fn step(message: &str) {
    println!("{} {}", style("→").blue().bold(), message);
}

/// `✓ message`
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// `⚠ message`
pub fn warning(message: &str) {
    println!("{} {}", style("⚠").yellow(), message);
}

/// Format count with proper pluralization
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Column layout for pod summaries, in kubectl's order
pub struct PodTable<'a> {
    pods: &'a [PodSummary],
    show_namespace: bool,
}

impl<'a> PodTable<'a> {
    pub fn new(pods: &'a [PodSummary], show_namespace: bool) -> Self {
        Self {
            pods,
            show_namespace,
        }
    }

    fn header(&self) -> Vec<&'static str> {
        let mut header = vec!["NAME", "READY", "STATUS", "RESTARTS", "AGE"];
        if self.show_namespace {
            header.insert(0, "NAMESPACE");
        }
        header
    }

    fn row(&self, pod: &PodSummary) -> Vec<String> {
        let mut row = vec![
            pod.name.clone(),
            pod.ready_display(),
            pod.status.clone(),
            pod.restarts.to_string(),
            pod.age.clone().unwrap_or_else(|| "<unknown>".to_string()),
        ];
        if self.show_namespace {
            row.insert(0, pod.namespace.clone());
        }
        row
    }

    /// Write the table; columns are padded before styling so ANSI codes
    /// never skew the alignment
    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let header = self.header();
        let rows: Vec<Vec<String>> = self.pods.iter().map(|p| self.row(p)).collect();
        let status_col = header.iter().position(|h| *h == "STATUS").unwrap_or(0);

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                rows.iter()
                    .map(|r| r[i].len())
                    .chain(std::iter::once(header[i].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(h, w)| style(format!("{:<w$}", h, w = w)).bold().to_string())
            .collect();
        writeln!(writer, "{}", line.join("   ").trim_end())?;

        for (pod, row) in self.pods.iter().zip(&rows) {
            let status_style = if pod.is_healthy() {
                Style::new().green()
            } else if pod.status == "Pending" || pod.status == "ContainerCreating" {
                Style::new().yellow()
            } else {
                Style::new().red()
            };

            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = format!("{:<w$}", cell, w = w);
                    if i == status_col {
                        status_style.apply_to(padded).to_string()
                    } else {
                        padded
                    }
                })
                .collect();
            writeln!(writer, "{}", cells.join("   ").trim_end())?;
        }

        Ok(())
    }
}
