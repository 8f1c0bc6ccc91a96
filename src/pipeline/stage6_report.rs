use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::model::category::Category;
use crate::pipeline::stage4_ranking::CategoryRanking;
use crate::pipeline::stage5_round_details::RoundDetails;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::tsv::render_tsv;
use crate::report::{ExportRow, input_rows, ranking_rows, round_detail_rows};
use crate::store::ResultsStore;

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub store: &'a ResultsStore,
    pub rankings: &'a [CategoryRanking],
    pub details: &'a [RoundDetails],
    pub tool_name: String,
    pub tool_version: String,
}

/// Writes rankings.tsv, round_details.tsv, input_data.tsv, summary.json and
/// report.txt into `out_dir`. The store is only read.
pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    let rankings_path = out_dir.join("rankings.tsv");
    let blocks = input
        .rankings
        .iter()
        .map(|r| (r.category.name().to_string(), ranking_rows(r)))
        .collect::<Vec<_>>();
    write_text(&rankings_path, &render_blocks(&blocks))?;
    written.push(rankings_path);

    let details_path = out_dir.join("round_details.tsv");
    let blocks = input
        .details
        .iter()
        .map(|d| {
            (
                format!("{} - Round {}", d.category, d.round + 1),
                round_detail_rows(d),
            )
        })
        .collect::<Vec<_>>();
    write_text(&details_path, &render_blocks(&blocks))?;
    written.push(details_path);

    let inputs_path = out_dir.join("input_data.tsv");
    let rows = Category::ALL
        .into_iter()
        .flat_map(|c| input_rows(input.store, c))
        .collect::<Vec<_>>();
    write_text(&inputs_path, &render_tsv(&rows))?;
    written.push(inputs_path);

    let summary_path = out_dir.join("summary.json");
    let json = render_summary_json(input.rankings, &input.tool_name, &input.tool_version)
        .map_err(std::io::Error::other)?;
    write_text(&summary_path, &json)?;
    written.push(summary_path);

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(input.rankings, input.details))?;
    written.push(report_path);

    for path in &written {
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(written)
}

/// Titled TSV blocks separated by a blank line; each block has its own
/// header since round counts differ between categories.
fn render_blocks(blocks: &[(String, Vec<ExportRow>)]) -> String {
    let mut out = String::new();
    for (i, (title, rows)) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("# {title}\n"));
        out.push_str(&render_tsv(rows));
    }
    out
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
