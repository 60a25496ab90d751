//! Play command - run games between two teams
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_layout(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use capture_agents::{create_team, CaptureAgent, TeamOptions};
use capture_core::{CaptureState, GameResult, Layout, Team, WorldState, DEFAULT_MAX_MOVES};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Layout file (built-in layout when omitted)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Red team options, e.g. "first=OffensiveAgent,second=DefensiveAgent"
    #[arg(long, default_value = "")]
    pub red_opts: String,

    /// Blue team options
    #[arg(long, default_value = "")]
    pub blue_opts: String,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Move budget per game (all agents combined)
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    pub max_moves: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    score: i32,
    moves: u32,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    ties: usize,
    avg_score: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let layout = load_layout(args.layout.as_deref())?;
    let red: TeamOptions = args
        .red_opts
        .parse()
        .with_context(|| format!("Invalid red options: {:?}", args.red_opts))?;
    let blue: TeamOptions = args
        .blue_opts
        .parse()
        .with_context(|| format!("Invalid blue options: {:?}", args.blue_opts))?;

    tracing::info!(
        "Starting match: red {}/{} vs blue {}/{} ({} games, {} moves)",
        red.first,
        red.second,
        blue.first,
        blue.second,
        args.games,
        args.max_moves
    );

    let results = play_match(&layout, &red, &blue, &args, seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the layout file, or the built-in layout
fn load_layout(path: Option<&Path>) -> Result<Layout> {
    let layout = match path {
        Some(path) => Layout::load(path)
            .with_context(|| format!("Failed to load layout: {}", path.display()))?,
        None => Layout::builtin().context("Built-in layout is invalid")?,
    };

    if layout.agent_starts.len() != 4 {
        bail!(
            "Layout must place 4 agents, found {}",
            layout.agent_starts.len()
        );
    }
    Ok(layout)
}

/// Play all games in the match
fn play_match(
    layout: &Layout,
    red: &TeamOptions,
    blue: &TeamOptions,
    args: &PlayArgs,
    seed: Option<u64>,
) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Fresh tie-break seeds per game, unless the options pin them
        let red = with_game_seed(red, &mut rng);
        let blue = with_game_seed(blue, &mut rng);

        let record = play_single_game(layout, &red, &blue, game_num + 1, args.max_moves)?;

        tracing::info!(
            "Game {}: {:?} (score {}, {} moves)",
            record.game_number,
            record.result,
            record.score,
            record.moves
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &PlayArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(results).context("Failed to encode results")?;
        println!("{}", json);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to the end
fn play_single_game(
    layout: &Layout,
    red: &TeamOptions,
    blue: &TeamOptions,
    game_number: usize,
    max_moves: u32,
) -> Result<GameRecord> {
    let mut state = CaptureState::new(layout).with_max_moves(max_moves);
    let mut agents = create_agents(&state, red, blue)?;

    let mut moves = 0;
    'game: loop {
        for agent in agents.iter_mut() {
            if state.is_over() {
                break 'game;
            }
            let index = agent.index();
            let observation = state.observation_for(index)?;
            let action = agent
                .choose_action(&observation)
                .with_context(|| format!("Agent {} failed to choose an action", index))?;
            state = state.successor(index, action)?;
            moves += 1;
        }
    }

    Ok(GameRecord {
        game_number,
        result: state.result(),
        score: state.score(),
        moves,
    })
}

/// Both teams in agent index order, initialized on the starting state
fn create_agents(state: &CaptureState, red: &TeamOptions, blue: &TeamOptions) -> Result<Vec<CaptureAgent>> {
    let [r0, r1] = create_team(0, 2, Team::Red, red)?;
    let [b0, b1] = create_team(1, 3, Team::Blue, blue)?;

    let mut agents = vec![r0, b0, r1, b1];
    for agent in &mut agents {
        agent.register_initial_state(state)?;
    }
    debug_assert_eq!(agents.len(), state.num_agents());
    Ok(agents)
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let red_wins = count(GameResult::RedWins);
    let blue_wins = count(GameResult::BlueWins);
    let ties = count(GameResult::Tie);

    let total_score: i32 = games.iter().map(|g| g.score).sum();
    let avg_score = if games.is_empty() {
        0.0
    } else {
        total_score as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        blue_wins,
        ties,
        avg_score,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Options with a seed drawn from the match RNG when none is given
fn with_game_seed(options: &TeamOptions, rng: &mut ChaCha8Rng) -> TeamOptions {
    let seed = rng.gen::<u64>();
    match options.seed {
        Some(_) => options.clone(),
        None => options.clone().with_seed(seed),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Blue wins:   {} ({:.1}%)", results.blue_wins, percent(results.blue_wins, total));
    println!("Ties:        {} ({:.1}%)", results.ties, percent(results.ties, total));
    println!("Avg score:   {:.1}", results.avg_score);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} with score {} after {} moves",
            game.game_number, game.result, game.score, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
