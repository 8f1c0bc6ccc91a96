use serde::Serialize;

use crate::model::baselines::Baselines;
use crate::pipeline::stage4_ranking::CategoryRanking;

#[derive(Serialize)]
struct SummaryOut<'a> {
    tool: ToolMeta<'a>,
    categories: Vec<CategoryOut<'a>>,
}

#[derive(Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct CategoryOut<'a> {
    category: &'static str,
    rounds: usize,
    baselines: Vec<BaselinesOut>,
    ranking: Vec<RankingOut<'a>>,
}

#[derive(Serialize)]
struct BaselinesOut {
    round: usize,
    best_payload: f64,
    best_loading_time: f64,
    best_circuit_time: f64,
    best_glide_time: f64,
}

#[derive(Serialize)]
struct RankingOut<'a> {
    rank: usize,
    team_id: u32,
    name: &'a str,
    organization: &'a str,
    round_scores: &'a [Option<f64>],
    rounds_average: f64,
    static_score: f64,
    penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    penalty_reason: Option<&'a str>,
    total: f64,
}

fn baselines_out(round: usize, b: &Baselines) -> BaselinesOut {
    BaselinesOut {
        round,
        best_payload: b.payload,
        best_loading_time: b.loading_time,
        best_circuit_time: b.circuit_time,
        best_glide_time: b.glide_time,
    }
}

pub fn render_summary_json(
    rankings: &[CategoryRanking],
    tool_name: &str,
    tool_version: &str,
) -> serde_json::Result<String> {
    let summary = SummaryOut {
        tool: ToolMeta {
            name: tool_name,
            version: tool_version,
        },
        categories: rankings
            .iter()
            .map(|r| CategoryOut {
                category: r.category.name(),
                rounds: r.round_count,
                baselines: r
                    .baselines
                    .iter()
                    .enumerate()
                    .map(|(i, b)| baselines_out(i, b))
                    .collect(),
                ranking: r
                    .rows
                    .iter()
                    .map(|row| RankingOut {
                        rank: row.rank,
                        team_id: row.team_id,
                        name: &row.name,
                        organization: &row.organization,
                        round_scores: &row.round_scores,
                        rounds_average: row.season.rounds,
                        static_score: row.season.static_score,
                        penalty: row.season.penalty,
                        penalty_reason: row.penalty_reason.as_deref(),
                        total: row.season.total,
                    })
                    .collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&summary)
}
