use lootflip_autoplay::{write_json, write_text, AutoplayConfig, Simulator};
use lootflip_core::{
    Event, EventBus, GameConfig, Phase, RunState, Side, TrophyTier, TurnResult,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone)]
struct CliOptions {
    auto: bool,
    cui: bool,
    seed: u64,
    games: u32,
    turns: Option<u32>,
    json_path: Option<PathBuf>,
    text_path: Option<PathBuf>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            auto: false,
            cui: false,
            seed: DEFAULT_RUN_SEED,
            games: 1,
            turns: None,
            json_path: None,
            text_path: None,
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args);
    let outcome = if options.cui {
        lootflip_cui::run_with_args(&args).map_err(|err| err.to_string())
    } else if options.auto {
        run_auto(&options)
    } else {
        run_repl(&options)
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" | "-a" => options.auto = true,
            "--cui" => options.cui = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(seed) = value.parse::<u64>() {
                        options.seed = seed;
                    }
                    idx += 1;
                }
            }
            "--games" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(games) = value.parse::<u32>() {
                        options.games = games.max(1);
                    }
                    idx += 1;
                }
            }
            "--turns" => {
                if let Some(value) = args.get(idx + 1) {
                    options.turns = value.parse::<u32>().ok();
                    idx += 1;
                }
            }
            "--json" => {
                if let Some(value) = args.get(idx + 1) {
                    options.json_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--text" => {
                if let Some(value) = args.get(idx + 1) {
                    options.text_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn game_config(options: &CliOptions) -> GameConfig {
    match options.turns {
        Some(turns) => GameConfig::with_max_turns(turns),
        None => GameConfig::default(),
    }
}

fn run_auto(options: &CliOptions) -> Result<(), String> {
    let cfg = AutoplayConfig {
        seed: options.seed,
        games: options.games,
        ..AutoplayConfig::default()
    };

    let mut scores = Vec::new();
    let mut last_result = None;
    for game in 0..cfg.games {
        let mut sim = Simulator::from_seed(game_config(options), cfg.seed + u64::from(game));
        let result = sim.run_policy(&cfg).map_err(|err| err.to_string())?;
        println!(
            "game {:>3}: {:?} score {} tier {} steps {}",
            game + 1,
            result.status,
            result.final_metrics.total_score,
            result.final_metrics.tier.label(),
            result.summary.steps
        );
        scores.push(result.final_metrics.total_score);
        last_result = Some(result);
    }

    if let Some(result) = last_result.as_ref() {
        if let Some(path) = options.json_path.as_ref() {
            write_json(path, result).map_err(|err| err.to_string())?;
            println!("trace written to {}", path.display());
        }
        if let Some(path) = options.text_path.as_ref() {
            write_text(path, result).map_err(|err| err.to_string())?;
            println!("report written to {}", path.display());
        }
    }

    let best = scores.iter().copied().max().unwrap_or(0);
    let total: u64 = scores.iter().map(|s| u64::from(*s)).sum();
    println!(
        "played {} game(s): best {} avg {:.1}",
        scores.len(),
        best,
        total as f64 / scores.len().max(1) as f64
    );
    Ok(())
}

fn run_repl(options: &CliOptions) -> Result<(), String> {
    let mut run = RunState::new(game_config(options), options.seed);
    let mut events = EventBus::default();

    println!("lootflip (seed {}). Type 'help' for commands.", options.seed);
    advance(&mut run, &mut events);
    print_state(&run);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => return Err(err.to_string()),
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let arg = parts.next();
        match command {
            "" => {}
            "help" | "?" => print_help(),
            "state" | "s" => print_state(&run),
            "flip" | "f" => {
                let Some(side) = arg.and_then(parse_side) else {
                    println!("usage: flip l|r");
                    continue;
                };
                match run.flip(side, &mut events) {
                    Ok(result) => {
                        println!("{}", describe_result(&result));
                        drain_events(&mut events);
                        if !result.is_terminal() {
                            advance(&mut run, &mut events);
                        }
                        print_state(&run);
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            "bank" | "b" => {
                if !run.can_bank() {
                    println!("nothing to bank");
                    continue;
                }
                match run.bank(&mut events) {
                    Ok(result) => {
                        println!("{}", describe_result(&result));
                        drain_events(&mut events);
                        advance(&mut run, &mut events);
                        print_state(&run);
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            "next" | "n" => {
                advance(&mut run, &mut events);
                print_state(&run);
            }
            "restart" => {
                run.restart();
                advance(&mut run, &mut events);
                print_state(&run);
            }
            "quit" | "q" | "exit" => break,
            other => println!("unknown command '{other}' (try 'help')"),
        }
    }
    Ok(())
}

fn advance(run: &mut RunState, events: &mut EventBus) {
    if run.state.phase == Phase::AwaitingFlip {
        return;
    }
    match run.start_next_turn(events) {
        Ok(TurnResult::GameOver {
            reason,
            total_score,
            trophy_tier,
        }) => {
            println!(
                "game over ({reason:?}): score {total_score}, trophy {}",
                trophy_tier.label()
            );
        }
        Ok(_) => {}
        Err(err) => println!("error: {err}"),
    }
    drain_events(events);
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("  * {}", format_event(&event));
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::TurnStarted {
            turns_left,
            hazard_chance,
        } => format!(
            "turn ready, {turns_left} left, hazard {:.0}%",
            hazard_chance * 100.0
        ),
        Event::TreasureFound { loot } => format!("treasure: {}", loot.describe()),
        Event::ShieldSpent => "shield spent".to_string(),
        Event::DuplicateBusted { value } => format!("duplicate {value}, run bust"),
        Event::HazardHit { lives_left } => format!("hazard hit, {lives_left} lives left"),
        Event::Banked {
            points,
            total_score,
            tier,
        } => format!("banked {points}, total {total_score} ({})", tier.label()),
        Event::GameEnded {
            reason,
            total_score,
            tier,
        } => format!(
            "game over ({reason:?}), score {total_score} ({})",
            tier.label()
        ),
    }
}

fn parse_side(value: &str) -> Option<Side> {
    match value {
        "l" | "left" => Some(Side::Left),
        "r" | "right" => Some(Side::Right),
        _ => None,
    }
}

fn describe_result(result: &TurnResult) -> String {
    match result {
        TurnResult::Ready => "turn ready".to_string(),
        TurnResult::Treasure {
            loot,
            duplicate_busted,
            shield_saved,
            turns_left,
            ..
        } => {
            if *duplicate_busted {
                format!("bust: {} was a duplicate ({turns_left} turns left)", loot.describe())
            } else if *shield_saved {
                format!("duplicate {}, shield spent", loot.describe())
            } else {
                format!("treasure: {} ({turns_left} turns left)", loot.describe())
            }
        }
        TurnResult::HazardHit {
            shield_saved,
            turns_left,
            ..
        } => {
            if *shield_saved {
                format!("hazard hit, shield spent ({turns_left} turns left)")
            } else {
                format!("hazard hit, life lost ({turns_left} turns left)")
            }
        }
        TurnResult::Banked {
            points,
            total_score,
            trophy_tier,
        } => format!(
            "banked {points}, total {total_score} ({})",
            trophy_tier.label()
        ),
        TurnResult::GameOver {
            reason,
            total_score,
            trophy_tier,
        } => format!(
            "game over ({reason:?}): score {total_score}, trophy {}",
            trophy_tier.label()
        ),
    }
}

fn print_state(run: &RunState) {
    let state = &run.state;
    let uniques: Vec<String> = state.uniques.iter().map(|v| v.to_string()).collect();
    println!(
        "lives {} | turns {}/{} | streak {} | banked {} ({}) | pot {}",
        state.lives,
        state.turns_left,
        state.max_turns,
        state.streak,
        state.total_score,
        tier_label(run),
        lootflip_core::bank_points(&run.config.bank_table, state.unique_count()),
    );
    println!(
        "uniques [{}] | shield {} | scrambler {} | jammer {}",
        uniques.join(","),
        if state.has_shield { "yes" } else { "no" },
        state.scrambler_charges,
        state.jammer_turns
    );
    if let Some(last) = state.last_event.as_ref() {
        println!("last: {last}");
    }
}

fn tier_label(run: &RunState) -> &'static str {
    match run.trophy_tier() {
        TrophyTier::None => "no trophy",
        tier => tier.label(),
    }
}

fn print_help() {
    println!("commands:");
    println!("  state | s          show the current state");
    println!("  flip l|r | f l|r   flip the left or right card");
    println!("  bank | b           bank the current run");
    println!("  next | n           deal the next turn");
    println!("  restart            start a fresh game");
    println!("  quit | q           leave");
}
