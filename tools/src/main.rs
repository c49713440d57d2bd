//! shelter-runner: headless driver for the smart-shelter simulation core.
//!
//! Usage:
//!   shelter-runner --seed 12345 --ticks 30
//!   shelter-runner --seed 12345 --interval-ms 2000 --ticks 30
//!   shelter-runner --ipc-mode
//!
//! The runner owns the timer the engine deliberately does not: in plain
//! mode it drives `tick()` at `--interval-ms` cadence; in IPC mode a UI
//! layer sends line-delimited JSON commands on stdin and receives the
//! engine state on stdout after each one.

use anyhow::Result;
use shelter_core::{
    config::SimConfig,
    engine::MotionEngine,
    entity::{Entity, EntityDef},
    geo::Coordinate,
    proximity::{self, Nearest},
    types::{BatchId, Tick},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Spawn {
        lat: f64,
        lon: f64,
        #[serde(default)]
        defs: Vec<EntityDef>,
    },
    Tick {
        count: u64,
    },
    Shuffle,
    Clear,
    Toggle {
        lat: f64,
        lon: f64,
    },
    Nearest {
        lat: f64,
        lon: f64,
    },
    GetState,
    Quit,
}

#[derive(serde::Serialize)]
struct NearestStation {
    label:      String,
    distance_m: f64,
}

impl From<Nearest<'_>> for NearestStation {
    fn from(n: Nearest<'_>) -> Self {
        Self {
            label:      n.point.label.clone(),
            distance_m: n.distance_m,
        }
    }
}

#[derive(serde::Serialize)]
struct UiState {
    tick:     Tick,
    active:   bool,
    batch:    Option<BatchId>,
    entities: Vec<Entity>,
    nearest:  Option<NearestStation>,
}

/// Demo routes used when the IPC client sends no definitions of its
/// own. Matches the dashboard's default Chennai shelter.
fn demo_defs() -> Vec<EntityDef> {
    vec![
        EntityDef::new("24B", "Anna Square", 5),
        EntityDef::new("45C", "T. Nagar", 12),
        EntityDef::new("101", "Broadway", 22),
    ]
}

const DEFAULT_CENTER: (f64, f64) = (13.0827, 80.2707);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 30u64);
    let center_lat = parse_arg(&args, "--center-lat", DEFAULT_CENTER.0);
    let center_lon = parse_arg(&args, "--center-lon", DEFAULT_CENTER.1);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => SimConfig::load(&w[1])?,
        None => SimConfig::default(),
    };
    // --interval-ms 0 disables pacing entirely (fast-forward).
    let interval_ms = parse_arg(&args, "--interval-ms", config.tick_interval_ms);

    let run_id = format!("run-{}", uuid::Uuid::new_v4());
    let started_at = chrono::Local::now();
    log::info!("{run_id} started at {}", started_at.format("%Y-%m-%d %H:%M:%S"));

    let mut engine = MotionEngine::new(seed, config);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
        return Ok(());
    }

    println!("shelter-runner");
    println!("  run_id:   {run_id}");
    println!("  seed:     {seed}");
    println!("  ticks:    {ticks}");
    println!("  center:   ({center_lat}, {center_lon})");
    println!();

    let center = Coordinate::new(center_lat, center_lon);
    engine.spawn_batch(center, &demo_defs())?;

    for _ in 0..ticks {
        engine.tick();
        if interval_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(interval_ms));
        }
    }

    print_summary(&engine, &center);
    Ok(())
}

fn run_ipc_loop(engine: &mut MotionEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let mut nearest = None;
        let result = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Spawn { lat, lon, defs } => {
                let defs = if defs.is_empty() { demo_defs() } else { defs };
                engine.spawn_batch(Coordinate::new(lat, lon), &defs)
            }
            IpcCommand::Tick { count } => Ok(engine.run_ticks(count)),
            IpcCommand::Shuffle => Ok(engine.shuffle_attributes()),
            IpcCommand::Clear => Ok(engine.clear()),
            IpcCommand::Toggle { lat, lon } => {
                engine.toggle(Coordinate::new(lat, lon), &demo_defs())
            }
            IpcCommand::Nearest { lat, lon } => {
                let query = Coordinate::new(lat, lon);
                let stations = proximity::fallback_stations(&query);
                nearest = proximity::nearest_to(&query, &stations).map(NearestStation::from);
                Ok(vec![])
            }
            IpcCommand::GetState => Ok(vec![]),
        };

        match result {
            Ok(events) => {
                for event in &events {
                    log::debug!("event: {}", event.type_name());
                }
                let state = UiState {
                    tick:     engine.current_tick(),
                    active:   engine.is_active(),
                    batch:    engine.batch_id(),
                    entities: engine.snapshot().to_vec(),
                    nearest,
                };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(engine: &MotionEngine, center: &Coordinate) {
    println!("=== RUN SUMMARY ===");
    println!("  final tick: {}", engine.current_tick());
    println!("  buses:      {}", engine.snapshot().len());
    for bus in engine.snapshot() {
        println!(
            "  {:>4} {:<14} eta {:>3} min at ({:.5}, {:.5})",
            bus.id, bus.route, bus.eta_minutes, bus.position.lat, bus.position.lon
        );
    }

    let stations = proximity::fallback_stations(center);
    match proximity::nearest_to(center, &stations) {
        Some(n) => println!(
            "  nearest station: {} ({:.0} m)",
            n.point.label, n.distance_m
        ),
        None => println!("  nearest station: none"),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
