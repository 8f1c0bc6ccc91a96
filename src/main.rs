mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod store;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::input::{InputError, Roster, load_roster, load_rules, parse_assignment, parse_round_form};
use crate::model::category::Category;
use crate::model::round::{MissingFieldError, RoundInputs, RoundResult};
use crate::model::rules::ScoringRules;
use crate::model::team::TeamId;
use crate::pipeline::stage1_baselines::get_best_values;
use crate::pipeline::stage4_ranking::{persist_scores, rank_category, recompute_category};
use crate::pipeline::stage5_round_details::{RoundDetails, round_details, round_leaders};
use crate::pipeline::stage6_report::{ReportInput, write_reports};
use crate::report::format_score;
use crate::report::text::{render_leaders_text, render_ranking_text, render_round_details_text};
use crate::store::{
    JsonFileRepository, MemoryRepository, ResultsRepository, ResultsStore, StoreError,
};

#[derive(Debug, Parser)]
#[command(name = "uav-scorekeeper", version)]
#[command(about = "Scorekeeping for UAV design-and-flight competitions")]
struct Cli {
    /// Team roster (JSON: category -> list of teams)
    #[arg(long, global = true, default_value = "data/teams.json")]
    roster: PathBuf,

    /// Results store (JSON)
    #[arg(long, global = true, default_value = "data/results.json")]
    results: PathBuf,

    /// Scoring rule profile (JSON); defaults to the current ruleset
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Apply the pilot / legal-flight / landing multipliers
    #[arg(long, global = true)]
    strict_flags: bool,

    /// Run against an in-memory copy of the results store; nothing is written
    #[arg(long, global = true)]
    dry_run: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Season standings per category
    Rank {
        #[arg(long)]
        category: Option<Category>,
        /// Write recomputed round scores back to the results store
        #[arg(long)]
        persist: bool,
    },
    /// Per-round sub-score tables
    Rounds {
        #[arg(long)]
        category: Category,
        /// Round index (0-based); all rounds when omitted
        #[arg(long)]
        round: Option<usize>,
    },
    /// Top performers per metric for one round
    Leaders {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        round: usize,
    },
    /// Best-in-round reference values
    Baselines {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        round: usize,
    },
    /// Record a round; replaces an existing entry with the same index
    Submit {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        team: TeamId,
        #[arg(long)]
        round: usize,
        /// Measurement, e.g. --set "Unloaded Payload=500"
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Change fields of an existing round entry
    Edit {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        team: TeamId,
        #[arg(long)]
        round: usize,
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
    },
    /// Remove a round entry
    Delete {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        team: TeamId,
        #[arg(long)]
        round: usize,
    },
    /// Set a team's static score
    Static {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        team: TeamId,
        #[arg(long, allow_hyphen_values = true)]
        score: f64,
    },
    /// Set or clear a team's season penalty
    Penalty {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        team: TeamId,
        #[arg(long, required_unless_present = "clear")]
        amount: Option<f64>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long, conflicts_with_all = ["amount", "reason"])]
        clear: bool,
    },
    /// Write TSV / JSON / text reports into a directory
    Export {
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let rules = resolve_rules(cli.rules.as_deref(), cli.strict_flags)?;
    let repo = open_repository(&cli.results, cli.dry_run)?;
    let repo = repo.as_ref();

    match cli.command {
        Command::Rank { category, persist } => {
            let roster = load_roster(&cli.roster)?;
            let mut store = repo.load()?;
            let categories = category.map_or(Category::ALL.to_vec(), |c| vec![c]);
            for category in categories {
                let ranking = rank_category(&store, &roster, category, &rules);
                println!("{}", render_ranking_text(&ranking));
                if persist {
                    persist_scores(&mut store, category, &ranking.updates);
                }
            }
            if persist {
                repo.save(&store)?;
            }
        }
        Command::Rounds { category, round } => {
            let roster = load_roster(&cli.roster)?;
            let store = repo.load()?;
            for details in collect_round_details(&store, &roster, category, round, &rules) {
                println!("{}", render_round_details_text(&details));
            }
        }
        Command::Leaders { category, round } => {
            let roster = load_roster(&cli.roster)?;
            let store = repo.load()?;
            let limit = rules.leader_limits.get(category);
            let leaders = round_leaders(&store, &roster, category, round, limit);
            println!("{}", render_leaders_text(&leaders));
        }
        Command::Baselines { category, round } => {
            let store = repo.load()?;
            let b = get_best_values(&store, category, round);
            println!("{category} round {round}");
            println!("best payload:      {}", format_score(b.payload));
            println!("best loading time: {}", format_score(b.loading_time));
            println!("best circuit time: {}", format_score(b.circuit_time));
            println!("best glide time:   {}", format_score(b.glide_time));
        }
        Command::Submit {
            category,
            team,
            round,
            set,
        } => {
            let roster = load_roster(&cli.roster)?;
            roster.require(category, team)?;
            let inputs = parse_pairs(&set)?;
            inputs.require()?;
            let mut store = repo.load()?;
            if store.upsert_round(category, team, RoundResult::new(round, inputs)) {
                tracing::info!(%category, team, round, "replaced existing round entry");
            }
            let score = rescore_and_save(repo, &mut store, category, team, round, &rules)?;
            println!("Score recorded: {}", format_score(score));
        }
        Command::Edit {
            category,
            team,
            round,
            set,
        } => {
            let changes = parse_pairs(&set)?;
            let mut store = repo.load()?;
            store.update_round(category, team, round, &changes)?.inputs.require()?;
            let score = rescore_and_save(repo, &mut store, category, team, round, &rules)?;
            println!("Round data updated: {}", format_score(score));
        }
        Command::Delete {
            category,
            team,
            round,
        } => {
            let mut store = repo.load()?;
            store.delete_round(category, team, round)?;
            let updates = recompute_category(&store, category, &rules).updates;
            persist_scores(&mut store, category, &updates);
            repo.save(&store)?;
            println!("Deleted round {round} of team {team} ({category})");
        }
        Command::Static {
            category,
            team,
            score,
        } => {
            let mut store = repo.load()?;
            store.set_static_score(category, team, score);
            repo.save(&store)?;
            println!("Static score for team {team} ({category}): {}", format_score(score));
        }
        Command::Penalty {
            category,
            team,
            amount,
            reason,
            clear,
        } => {
            let mut store = repo.load()?;
            match amount {
                Some(amount) if !clear => {
                    store.set_penalty(category, team, amount, reason);
                    println!("Penalty for team {team} ({category}): {}", format_score(amount));
                }
                _ => {
                    store.clear_penalty(category, team);
                    println!("Penalty cleared for team {team} ({category})");
                }
            }
            repo.save(&store)?;
        }
        Command::Export { out } => {
            let roster = load_roster(&cli.roster)?;
            let store = repo.load()?;
            let rankings = Category::ALL
                .into_iter()
                .map(|c| rank_category(&store, &roster, c, &rules))
                .collect::<Vec<_>>();
            let details = Category::ALL
                .into_iter()
                .flat_map(|c| collect_round_details(&store, &roster, c, None, &rules))
                .collect::<Vec<_>>();
            let input = ReportInput {
                store: &store,
                rankings: &rankings,
                details: &details,
                tool_name: "uav-scorekeeper".to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            };
            let written = write_reports(&input, &out)?;
            println!("Exported {} files to {}", written.len(), out.display());
        }
    }
    Ok(())
}

fn resolve_rules(path: Option<&Path>, strict_flags: bool) -> Result<ScoringRules, InputError> {
    let rules = match path {
        Some(path) => load_rules(path)?,
        None => ScoringRules::default_v1(),
    };
    if strict_flags {
        tracing::warn!("strict flag multipliers enabled; results differ from the default ruleset");
        return Ok(rules.with_strict_flags());
    }
    Ok(rules)
}

fn open_repository(path: &Path, dry_run: bool) -> Result<Box<dyn ResultsRepository>, StoreError> {
    let file = JsonFileRepository::new(path);
    if dry_run {
        tracing::warn!(path = %path.display(), "dry run: changes to the results store are discarded");
        return Ok(Box::new(MemoryRepository::new(file.load()?)));
    }
    Ok(Box::new(file))
}

fn parse_pairs(set: &[String]) -> Result<RoundInputs, InputError> {
    let pairs = set
        .iter()
        .map(|s| parse_assignment(s))
        .collect::<Result<Vec<_>, _>>()?;
    parse_round_form(&pairs)
}

/// Rescores the whole category after a change to one round (baselines may
/// have moved for everyone in it), saves, and returns the changed entry's
/// score.
fn rescore_and_save(
    repo: &dyn ResultsRepository,
    store: &mut ResultsStore,
    category: Category,
    team: TeamId,
    round: usize,
    rules: &ScoringRules,
) -> Result<f64, AppError> {
    let updates = recompute_category(store, category, rules).updates;
    persist_scores(store, category, &updates);
    repo.save(store)?;
    let score = updates
        .iter()
        .find(|u| u.team == team && u.round == round)
        .map(|u| u.score)
        .unwrap_or(0.0);
    Ok(score)
}

fn collect_round_details(
    store: &ResultsStore,
    roster: &Roster,
    category: Category,
    round: Option<usize>,
    rules: &ScoringRules,
) -> Vec<RoundDetails> {
    let rounds = match round {
        Some(r) => r..r + 1,
        None => 0..store.round_count(category),
    };
    rounds
        .map(|r| round_details(store, roster, category, r, rules))
        .collect()
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
