use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use heads_up_poker::api::parse_script;
use heads_up_poker::domain::hand::HandOutcome;
use heads_up_poker::domain::table::{StackPolicy, TableConfig, SEATS};
use heads_up_poker::engine::{ControllerEvent, EngineError, GameController};
use heads_up_poker::infra::{load_config, DeterministicRng};
use heads_up_poker::opponent::ScriptedOpponent;

/// Бот против бота (или JSON-скрипт против бота) на heads-up столе.
#[derive(Parser, Debug)]
#[command(author, version, about = "Heads-up hold'em simulator", long_about = None)]
struct Args {
    /// Сколько раздач сыграть.
    #[arg(long, default_value_t = 100)]
    hands: u32,

    /// Seed для воспроизводимых раздач (по умолчанию случайный).
    #[arg(long)]
    seed: Option<u64>,

    /// JSON-конфиг стола.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Переносить стеки между раздачами.
    #[arg(long)]
    carry_over: bool,

    /// Ждать реальные паузы бота и ранаута.
    #[arg(long)]
    realtime: bool,

    /// JSON-массив команд: герой играет по скрипту, бот – сам.
    #[arg(long)]
    script: Option<PathBuf>,
}

type Controller = GameController<DeterministicRng, ScriptedOpponent>;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TableConfig::default(),
    };
    if args.carry_over {
        config.stack_policy = StackPolicy::CarryOver;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("heads_up_sim: seed = {seed}");

    let policy = ScriptedOpponent::from_config(&config.opponent);
    let controller = GameController::new(config, DeterministicRng::from_seed(seed), policy);

    if let Some(path) = &args.script {
        return run_script(controller, path);
    }

    let mut controller = controller.with_autopilot([true; SEATS]);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(run_hands(&mut controller, args.hands, args.realtime))
}

/// Итоги серии раздач.
#[derive(Debug, Default)]
struct SimStats {
    hands: u32,
    wins: [u32; SEATS],
    splits: u32,
    folds: u32,
    total_pot: u64,
}

async fn run_hands(controller: &mut Controller, hands: u32, realtime: bool) -> Result<()> {
    let mut stats = SimStats::default();

    for _ in 0..hands {
        match controller.start_new_hand() {
            Ok(()) => {}
            Err(EngineError::PlayerBusted(seat)) => {
                println!("seat {seat} is busted, stopping");
                break;
            }
            Err(err) => return Err(err).context("starting a hand"),
        }

        let summary = loop {
            let events = if realtime {
                let Some(delay) = controller.next_deadline() else {
                    bail!("hand stalled with no pending tasks");
                };
                tokio::time::sleep(delay).await;
                controller.tick(delay)
            } else {
                controller.settle()
            };

            if realtime {
                for event in &events {
                    print_event(controller, event);
                }
            }
            if let Some(ControllerEvent::HandFinished(summary)) = events
                .into_iter()
                .find(|e| matches!(e, ControllerEvent::HandFinished(_)))
            {
                break summary;
            }
            if !realtime && controller.pending_tasks() == 0 {
                bail!("hand stalled with no pending tasks");
            }
        };

        stats.hands += 1;
        stats.total_pot += summary.total_pot.0;
        match summary.outcome {
            HandOutcome::Winner { seat, by_fold } => {
                stats.wins[seat as usize] += 1;
                if by_fold {
                    stats.folds += 1;
                }
            }
            HandOutcome::Split => stats.splits += 1,
        }

        let view = controller.snapshot(0);
        let text = view
            .showdown
            .map(|s| s.result_text)
            .unwrap_or_default();
        println!(
            "hand #{:<4} pot {:>5}  {:<32} stacks {} / {}",
            summary.hand_id, summary.total_pot, text, view.seats[0].stack, view.seats[1].stack
        );
    }

    let table = controller.table();
    println!();
    println!("=========== SIMULATION SUMMARY ===========");
    println!("Hands played: {}", stats.hands);
    for player in &table.seats {
        println!(
            "{:<8} wins: {:>5}  stack: {}",
            player.name, stats.wins[player.seat as usize], player.stack
        );
    }
    println!("Splits: {}", stats.splits);
    println!("Won without showdown: {}", stats.folds);
    if stats.hands > 0 {
        println!("Average pot: {}", stats.total_pot / u64::from(stats.hands));
    }
    println!("==========================================");
    Ok(())
}

fn run_script(mut controller: Controller, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let commands = parse_script(&json).context("parsing script")?;

    for command in commands {
        match controller.execute(command.clone()) {
            Ok(events) => {
                for event in &events {
                    print_event(&controller, event);
                }
            }
            Err(err) => println!("{command:?} rejected: {err}"),
        }
    }

    // Дать боту доиграть то, что осталось в очереди.
    for event in controller.settle() {
        print_event(&controller, &event);
    }

    let snapshot = controller.snapshot(0);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn print_event(controller: &Controller, event: &ControllerEvent) {
    let at = controller.now().as_millis();
    match event {
        ControllerEvent::OpponentActed { seat, kind } => {
            let name = controller
                .table()
                .seat(*seat)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            println!("[{at:>6} ms] {name}: {kind}");
        }
        ControllerEvent::StreetRevealed(street) => {
            println!("[{at:>6} ms] {street}: {:?}", controller.table().board);
        }
        ControllerEvent::HandFinished(summary) => {
            println!("[{at:>6} ms] hand #{} finished, pot {}", summary.hand_id, summary.total_pot);
        }
    }
}
