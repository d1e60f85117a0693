use apm_console::domain::{Agreement, Client, CreditApplication};
use apm_console::error::AppError;
use apm_console::workflows::listing::ListSnapshot;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Column layout of a list row in table and CSV output.
pub(crate) trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn date_time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|value| value.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

impl TableRow for CreditApplication {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Applicant",
        "Requested",
        "Status",
        "Approved",
        "Term",
        "Created",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.applicant_id.to_string(),
            format!("{:.2}", self.requested_amount),
            self.status.label().to_string(),
            optional(self.approved_amount.map(|amount| format!("{amount:.2}"))),
            optional(self.approved_term),
            date_time(self.created_at),
        ]
    }
}

impl TableRow for Agreement {
    const HEADERS: &'static [&'static str] = &["ID", "Application", "Signing status", "Signed at"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.application_id.to_string(),
            self.signing_status.label().to_string(),
            date_time(self.signed_at),
        ]
    }
}

impl TableRow for Client {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "First name",
        "Last name",
        "Middle name",
        "Phone",
        "Passport",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.middle_name.clone().unwrap_or_default(),
            self.phone.clone(),
            self.passport.clone(),
        ]
    }
}

pub(crate) fn render_page<T, W>(
    snapshot: &ListSnapshot<'_, T>,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError>
where
    T: TableRow + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Table => render_table(snapshot, out),
        OutputFormat::Csv => render_csv(snapshot.content, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, snapshot).map_err(std::io::Error::from)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_table<T: TableRow, W: Write>(
    snapshot: &ListSnapshot<'_, T>,
    out: &mut W,
) -> Result<(), AppError> {
    let rows: Vec<Vec<String>> = snapshot.content.iter().map(TableRow::cells).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|header| header.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = T::HEADERS.iter().map(|header| header.to_string()).collect();
    write_row(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    write_row(out, &rule, &widths)?;
    if rows.is_empty() {
        writeln!(out, "(no rows)")?;
    }
    for row in &rows {
        write_row(out, row, &widths)?;
    }

    writeln!(out, "{}", page_footer(snapshot))?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn page_footer<T>(snapshot: &ListSnapshot<'_, T>) -> String {
    let mut footer = format!("Page {} | {} total", snapshot.page, snapshot.total);
    let mut moves = Vec::new();
    if snapshot.has_prev {
        moves.push(format!("prev: --page {}", snapshot.page - 1));
    }
    if snapshot.has_next {
        moves.push(format!("next: --page {}", snapshot.page + 1));
    }
    if !moves.is_empty() {
        footer.push_str(" | ");
        footer.push_str(&moves.join(", "));
    }
    footer
}

fn render_csv<T: TableRow, W: Write>(rows: &[T], out: &mut W) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(T::HEADERS)
        .map_err(std::io::Error::from)?;
    for row in rows {
        writer
            .write_record(row.cells())
            .map_err(std::io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}
