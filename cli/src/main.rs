use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use stackmine_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP, Target};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum Preset {
    /// 5x5, four or five bombs, uncapped stack
    Standard,
    /// 4x4, three bombs, stack capped at 8x
    Compact,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Preset::Standard)]
    preset: Preset,

    /// Starting balance
    #[arg(short, long)]
    balance: Option<f64>,

    /// Resolve every reveal immediately
    #[arg(long)]
    no_delay: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let mut config = match self.preset {
            Preset::Standard => GameConfig::standard(),
            Preset::Compact => GameConfig::compact(),
        };
        if let Some(balance) = self.balance {
            config.starting_balance = balance;
        }
        if self.no_delay {
            config.deferred = None;
        }
        config
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Single control loop: waits for either the next input line or the next deferred reveal timer.
struct Session {
    engine: WagerEngine,
    timers: Vec<(Instant, DeferredReveal)>,
}

impl Session {
    fn new(engine: WagerEngine) -> Self {
        Self {
            engine,
            timers: Vec::new(),
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|&(due, _)| due).min()
    }

    fn fire_due_timers(&mut self) {
        let now = Instant::now();
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|&(due, _)| due <= now);
        self.timers = waiting;
        for (_, ticket) in due {
            match self.engine.fire_deferred(ticket) {
                Some(outcome @ RevealOutcome::Rejected(_)) => {
                    // rejections are not queued as events
                    if let Some(line) = render::reveal(&outcome) {
                        println!("{line}");
                    }
                }
                Some(_) => {}
                None => {
                    log::debug!("Timer for cell {} fired after its round ended", ticket.index);
                }
            }
        }
        self.print_events();
        self.print_board();
    }

    fn print_board(&self) {
        println!("{}", render::board(&RoundSnapshot::from_engine(&self.engine)));
    }

    fn print_events(&mut self) {
        for event in self.engine.drain_events() {
            if let Some(line) = render::event(&event) {
                println!("{line}");
            }
        }
    }

    fn resolve_target(&self, target: Target) -> Option<CellIndex> {
        let size = self.engine.round().grid().size();
        match target {
            Target::Index(index) => Some(index),
            Target::Coords(coords) if coords.0 < size.0 && coords.1 < size.1 => {
                Some(coords_to_index(coords, size))
            }
            Target::Coords(_) => None,
        }
    }

    /// Returns `false` once the player asked to quit.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Reveal(target) => {
                let outcome = self
                    .resolve_target(target)
                    .ok_or(GameError::InvalidIndex)
                    .and_then(|index| self.engine.reveal(index));
                match outcome {
                    Ok(RevealOutcome::Pending(ticket)) => {
                        self.timers.push((Instant::now() + ticket.delay, ticket));
                    }
                    Ok(outcome @ RevealOutcome::Rejected(_)) => {
                        if let Some(line) = render::reveal(&outcome) {
                            println!("{line}");
                        }
                    }
                    Ok(_) => {}
                    Err(err) => println!("{err}."),
                }
            }
            Command::Collect => {
                if let CollectOutcome::Rejected(reason) = self.engine.collect() {
                    println!("{reason}.");
                }
            }
            Command::Bet(amount) => {
                if let BetOutcome::Rejected(reason) = self.engine.set_bet(amount) {
                    println!("{reason}.");
                }
            }
            Command::StepBet(step) => {
                if let BetOutcome::Rejected(reason) = self.engine.step_bet(step) {
                    println!("{reason}.");
                }
            }
            Command::NewRound => {
                self.engine.begin_round();
            }
            Command::Show => {}
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        self.print_events();
        self.print_board();
        true
    }

    fn run(mut self, input: Receiver<String>) {
        self.print_events();
        self.print_board();

        loop {
            let line = match self.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match input.recv_timeout(wait) {
                        Ok(line) => Some(line),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => {
                            std::thread::sleep(wait);
                            None
                        }
                    }
                }
                None => match input.recv() {
                    Ok(line) => Some(line),
                    Err(_) => break,
                },
            };

            let Some(line) = line else {
                self.fire_due_timers();
                continue;
            };

            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.handle(command) {
                        break;
                    }
                }
                Err(command::ParseCommandError::Empty) => {}
                Err(err) => println!("{err}"),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(entropy_seed);
    log::debug!("seed: {seed}");

    let engine =
        WagerEngine::new(args.game_config(), seed).context("Invalid game configuration")?;

    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("Could not spawn input thread")?;

    println!("{HELP}");
    Session::new(engine).run(rx);
    Ok(())
}
