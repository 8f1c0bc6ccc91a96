use crate::model::category::Category;
use crate::model::round::{FieldValue, InputField, RoundInputs};
use crate::pipeline::stage2_round_score::ScoreBreakdown;
use crate::pipeline::stage4_ranking::CategoryRanking;
use crate::pipeline::stage5_round_details::{LeaderEntry, RoundDetails, RoundLeaders};
use crate::store::ResultsStore;

pub mod json;
pub mod text;
pub mod tsv;

/// One output row: ordered named string fields, the contract shared by
/// every renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow {
    pub fields: Vec<(String, String)>,
}

impl ExportRow {
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }
}

pub fn format_score(v: f64) -> String {
    format!("{:.2}", v)
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

fn yes_no(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

pub fn ranking_rows(ranking: &CategoryRanking) -> Vec<ExportRow> {
    ranking
        .rows
        .iter()
        .map(|r| {
            let mut row = ExportRow::default();
            row.push("Rank", r.rank.to_string())
                .push("Team ID", r.team_id.to_string())
                .push("Team Name", r.name.as_str())
                .push("Organization", r.organization.as_str());
            for (i, score) in r.round_scores.iter().enumerate() {
                let value = score.map(format_score).unwrap_or_else(|| "-".to_string());
                row.push(format!("R{}", i + 1), value);
            }
            row.push("Static", format_score(r.season.static_score))
                .push("Penalty", format_score(r.season.penalty))
                .push("Penalty Reason", r.penalty_reason.as_deref().unwrap_or(""))
                .push("Total Score", format_score(r.season.total));
            row
        })
        .collect()
}

pub fn round_detail_rows(details: &RoundDetails) -> Vec<ExportRow> {
    details
        .rows
        .iter()
        .map(|r| {
            let b = r.breakdown;
            let sub = |pick: fn(&ScoreBreakdown) -> f64| {
                format_score(b.as_ref().map(pick).unwrap_or(0.0))
            };
            let inputs = r.inputs.as_ref();
            let takeoff = inputs
                .and_then(|i| i.takeoff_distance)
                .map(format_number)
                .unwrap_or_else(|| "-".to_string());
            let pilot = match inputs.and_then(|i| i.team_pilot) {
                Some(true) => "Team",
                Some(false) => "External",
                None => "-",
            };
            // Stored inverted: "yes" here means replacement parts were used.
            let replacements = match inputs.and_then(|i| i.no_replacement_parts) {
                Some(no_parts) => yes_no(Some(!no_parts)),
                None => "-",
            };

            let mut row = ExportRow::default();
            row.push("Rank", r.rank.to_string())
                .push("Team ID", r.team_id.to_string())
                .push("Team Name", r.name.as_str())
                .push("Organization", r.organization.as_str())
                .push("Payload", sub(|b| b.payload))
                .push("Circuit", sub(|b| b.circuit))
                .push("Glide", sub(|b| b.glide))
                .push("Loading", sub(|b| b.loading))
                .push("Altitude", sub(|b| b.altitude))
                .push("Flight Score", format_score(r.total))
                .push("Takeoff", takeoff)
                .push("Pilot", pilot)
                .push("Legal", yes_no(inputs.and_then(|i| i.legal_flight)))
                .push("Landing", yes_no(inputs.and_then(|i| i.good_landing)))
                .push("Repl. Parts", replacements);
            row
        })
        .collect()
}

/// Raw recorded inputs of one category, one row per team round.
pub fn input_rows(store: &ResultsStore, category: Category) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for (team, rounds) in store.teams(category) {
        for entry in rounds {
            let mut row = ExportRow::default();
            row.push("Category", category.name())
                .push("Team ID", team.to_string())
                .push("Round", (entry.round + 1).to_string());
            push_inputs(&mut row, &entry.inputs);
            row.push(
                "Score",
                entry.score.map(format_score).unwrap_or_default(),
            );
            rows.push(row);
        }
    }
    rows
}

fn push_inputs(row: &mut ExportRow, inputs: &RoundInputs) {
    for field in InputField::ALL {
        let value = match inputs.get(field) {
            Some(FieldValue::Number(v)) => format_number(v),
            Some(FieldValue::Flag(b)) => u8::from(b).to_string(),
            None => String::new(),
        };
        row.push(field.key(), value);
    }
}

pub fn leader_rows(leaders: &RoundLeaders) -> Vec<ExportRow> {
    let depth = [
        leaders.payload.len(),
        leaders.circuit.len(),
        leaders.glide.len(),
        leaders.loading.len(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let cell = |list: &[LeaderEntry], i: usize| {
        list.get(i)
            .map(|e| format!("{} ({})", e.name, format_score(e.value)))
            .unwrap_or_default()
    };

    (0..depth)
        .map(|i| {
            let mut row = ExportRow::default();
            row.push("Rank", ordinal(i + 1))
                .push("Best Payloads", cell(&leaders.payload, i))
                .push("Best Circuit Times", cell(&leaders.circuit, i))
                .push("Best Gliding Times", cell(&leaders.glide, i))
                .push("Best Loading Times", cell(&leaders.loading, i));
            row
        })
        .collect()
}

pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
