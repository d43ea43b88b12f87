//! Result tables: aligned text for the terminal, TSV and JSON exports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use tradesim_core::config::{PresentationMode, SimulationConfig};
use tradesim_core::model::{Comparison, ComparisonRow, Metric, MetricUnit};

const CLASSIC_METRICS: [Metric; 6] = [
    Metric::TerminalPnl,
    Metric::WinProbability,
    Metric::ProfitLossRatio,
    Metric::SharpeRatio,
    Metric::Cagr,
    Metric::MaxDrawdown,
];

/// Metrics shown for a presentation mode, in row order
#[must_use]
pub fn report_metrics(mode: PresentationMode) -> &'static [Metric] {
    match mode {
        PresentationMode::Classic => &CLASSIC_METRICS,
        PresentationMode::Extended => &Metric::ALL,
    }
}

/// Render one metric value in its unit
#[must_use]
pub fn format_value(metric: Metric, value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    match metric.unit() {
        MetricUnit::Currency | MetricUnit::Ratio => format!("{value:.2}"),
        MetricUnit::Fraction => format!("{:.2}%", value * 100.0),
        MetricUnit::Periods => format!("{} periods", value.ceil()),
    }
}

/// Confidence level as a percentage with at most two decimals, e.g. `97.5`
#[must_use]
pub fn format_level(confidence: f64) -> String {
    let text = format!("{:.2}", confidence * 100.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Header plus string cells, shared by the text and TSV renderings
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Classic tables carry a mean-interval column; extended tables do not.
    #[must_use]
    pub fn from_comparison(comparison: &Comparison, mode: PresentationMode) -> Self {
        let show_interval = mode == PresentationMode::Classic;
        let confidence = comparison
            .simulation
            .summaries
            .first()
            .map_or(0.95, |s| s.interval.confidence);

        let mut headers = vec!["Metric".to_string(), "Actual".into(), "Mean".into()];
        headers.extend(comparison.quantiles().iter().map(|q| format!("{q}%")));
        if show_interval {
            headers.push(format!("Mean CI ({}%)", format_level(confidence)));
        }

        let metrics = report_metrics(mode);
        let rows = comparison
            .rows()
            .into_iter()
            .filter(|row| metrics.contains(&row.metric))
            .map(|row| Self::cells(&row, show_interval))
            .collect();

        Self { headers, rows }
    }

    fn cells(row: &ComparisonRow, show_interval: bool) -> Vec<String> {
        let fmt = |v| format_value(row.metric, v);
        let mut cells = vec![
            row.metric.label().to_string(),
            fmt(row.actual),
            fmt(row.mean),
        ];
        cells.extend(row.percentiles.iter().map(|&(_, v)| fmt(v)));
        if show_interval {
            cells.push(format!(
                "{} [{}, {}]",
                fmt(row.mean),
                fmt(row.interval.low),
                fmt(row.interval.high)
            ));
        }
        cells
    }

    /// Space-aligned table, first column left aligned, the rest right aligned
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    if i == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }

    /// Tab-separated rendering with a header line
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = self.headers.join("\t");
        for row in &self.rows {
            out.push('\n');
            out.push_str(&row.join("\t"));
        }
        out.push('\n');
        out
    }
}

/// One-line description of the run above the table
#[must_use]
pub fn run_summary(comparison: &Comparison, config: &SimulationConfig) -> String {
    format!(
        "{} trials over {} periods, initial capital {:.2} ({:?} Sharpe)",
        comparison.simulation.num_trials,
        comparison.benchmark.periods,
        comparison.benchmark.initial_capital,
        config.sharpe_variant()
    )
}

pub fn write_tsv(table: &ReportTable, path: &Path) -> color_eyre::Result<()> {
    fs::write(path, table.to_tsv())
        .wrap_err_with(|| format!("Failed to write TSV {}", path.display()))
}

/// Full comparison as pretty JSON; infinite values serialize as `null`.
pub fn write_json(comparison: &Comparison, path: &Path) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(comparison).wrap_err("Failed to serialize results")?;
    fs::write(path, json).wrap_err_with(|| format!("Failed to write JSON {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradesim_core::config::SimulationBuilder;
    use tradesim_core::model::ReturnSeries;
    use tradesim_core::run_comparison;

    fn comparison(mode: PresentationMode) -> Comparison {
        let series = ReturnSeries::new(vec![10.0, -5.0, 0.0, 7.5, -2.5, 4.0]).unwrap();
        let config = SimulationBuilder::new()
            .initial_capital(100.0)
            .trials(50)
            .mode(mode)
            .seed(3)
            .build()
            .unwrap();
        run_comparison(&series, &config, None).unwrap()
    }

    #[test]
    fn test_format_value_by_unit() {
        assert_eq!(format_value(Metric::TerminalPnl, 4_123.456), "4123.46");
        assert_eq!(format_value(Metric::WinProbability, 0.6), "60.00%");
        assert_eq!(format_value(Metric::MaxUnderwater, 3.2), "4 periods");
        assert_eq!(format_value(Metric::RewardRatio, f64::INFINITY), "inf");
    }

    #[test]
    fn test_confidence_header_has_no_float_noise() {
        assert_eq!(format_level(0.57), "57");
        assert_eq!(format_level(0.95), "95");
        assert_eq!(format_level(0.975), "97.5");
        assert_eq!(format_level(0.999), "99.9");

        let series = ReturnSeries::new(vec![10.0, -5.0, 0.0, 7.5]).unwrap();
        let config = SimulationBuilder::new()
            .trials(20)
            .classic()
            .confidence(0.57)
            .seed(1)
            .build()
            .unwrap();
        let comparison = run_comparison(&series, &config, None).unwrap();
        let table = ReportTable::from_comparison(&comparison, PresentationMode::Classic);
        assert_eq!(table.headers.last().unwrap(), "Mean CI (57%)");
    }

    #[test]
    fn test_classic_table_shape() {
        let table = ReportTable::from_comparison(
            &comparison(PresentationMode::Classic),
            PresentationMode::Classic,
        );
        // metric, actual, mean, 7 percentiles, interval
        assert_eq!(table.headers.len(), 11);
        assert_eq!(table.headers[3], "5%");
        assert_eq!(table.headers[10], "Mean CI (95%)");
        assert_eq!(table.rows.len(), 6);
        assert!(table.rows.iter().all(|r| r.len() == 11));
    }

    #[test]
    fn test_extended_table_shape() {
        let table = ReportTable::from_comparison(
            &comparison(PresentationMode::Extended),
            PresentationMode::Extended,
        );
        assert_eq!(table.headers.len(), 12);
        assert_eq!(table.headers[3], "1%");
        assert_eq!(table.rows.len(), 8);
        assert_eq!(table.rows[6][0], "Max Underwater Period");
    }

    #[test]
    fn test_tsv_matches_table() {
        let table = ReportTable::from_comparison(
            &comparison(PresentationMode::Classic),
            PresentationMode::Classic,
        );
        let tsv = table.to_tsv();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with("Metric\tActual\tMean\t5%"));
        assert_eq!(lines[1].split('\t').count(), 11);
    }

    #[test]
    fn test_text_rows_aligned() {
        let table = ReportTable::from_comparison(
            &comparison(PresentationMode::Extended),
            PresentationMode::Extended,
        );
        let text = table.render_text();
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&comparison(PresentationMode::Extended), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["simulation"]["num_trials"], 50);
        assert_eq!(value["benchmark"]["periods"], 6);
    }
}
