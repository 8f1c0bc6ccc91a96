use crate::pipeline::stage4_ranking::CategoryRanking;
use crate::pipeline::stage5_round_details::{RoundDetails, RoundLeaders};
use crate::report::{ExportRow, format_score, leader_rows, ranking_rows, round_detail_rows};

/// Left-aligned fixed-width table with a dashed rule under the header.
pub fn render_table(rows: &[ExportRow]) -> String {
    let Some(first) = rows.first() else {
        return "(no rows)\n".to_string();
    };
    let mut widths = first.names().map(|n| n.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (i, v) in row.values().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(v.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, first.names(), &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in rows {
        push_row(&mut out, row.values(), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_ranking_text(ranking: &CategoryRanking) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Team Rankings\n", ranking.category));
    out.push_str(&format!("Rounds: {}\n\n", ranking.round_count));
    out.push_str(&render_table(&ranking_rows(ranking)));
    out
}

pub fn render_round_details_text(details: &RoundDetails) -> String {
    let b = &details.baselines;
    let mut out = String::new();
    out.push_str(&format!(
        "{} - Round {}\n",
        details.category,
        details.round + 1
    ));
    out.push_str(&format!(
        "Best payload: {}  best loading time: {}  best circuit time: {}  best glide time: {}\n\n",
        format_score(b.payload),
        format_score(b.loading_time),
        format_score(b.circuit_time),
        format_score(b.glide_time)
    ));
    out.push_str(&render_table(&round_detail_rows(details)));
    out
}

pub fn render_leaders_text(leaders: &RoundLeaders) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} Top Performers - Round {}\n\n",
        leaders.category,
        leaders.round + 1
    ));
    out.push_str(&render_table(&leader_rows(leaders)));
    out
}

/// Full human-readable report: standings for each category followed by
/// the per-round tables.
pub fn render_report_text(rankings: &[CategoryRanking], details: &[RoundDetails]) -> String {
    let mut out = String::new();
    out.push_str("UAV Competition Results\n");
    out.push_str("=======================\n\n");
    for (i, ranking) in rankings.iter().enumerate() {
        out.push_str(&format!("{}. ", i + 1));
        out.push_str(&render_ranking_text(ranking));
        out.push('\n');
    }
    if !details.is_empty() {
        out.push_str("Round details\n");
        out.push_str("-------------\n\n");
        for d in details {
            out.push_str(&render_round_details_text(d));
            out.push('\n');
        }
    }
    out
}
