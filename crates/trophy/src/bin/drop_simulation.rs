//! # Drop Simulation
//!
//! Offline report for a drop table:
//!
//! 1. Simulated drop rate per type/variant at looting 0-3
//! 2. Repeated place → break cycles per configured head, checking the
//!    certification line stays unique
//!
//! Usage: `drop_simulation [path/to/drops.toml]` (default `data/drops.toml`).
//! Log level comes from `RUST_LOG`.

use std::process::ExitCode;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use trophy::{EventBus, HostEvent, MemoryBlockStores, TrophyEvent, TrophyListener};
use trophy_drops::{simulate_drop_rate, TrophySystem};
use trophy_shared::{BlockPos, CERTIFICATION_LINE};

const TRIALS: u32 = 100_000;
const CYCLES: usize = 5;
const DEFAULT_CONFIG: &str = "data/drops.toml";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let system = match TrophySystem::from_file(&path) {
        Ok(system) => system,
        Err(e) => {
            tracing::error!(%path, error = %e, "cannot load drop table");
            return ExitCode::FAILURE;
        }
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║           TROPHY DROP SIMULATION                                 ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("Config: {path}");
    println!("Trials per level: {TRIALS}");
    println!();

    print_rates(&system);
    let ok = run_round_trips(system);

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_rates(system: &TrophySystem) {
    let seed = system.config().rng_seed.unwrap_or(0);

    println!("┌─ DROP RATES ─────────────────────────────────────────────────────┐");
    println!("│ {:<32} {:>7} {:>7} {:>7} {:>7}", "TYPE / VARIANT", "L0", "L1", "L2", "L3");
    for entry in system.catalog().entries() {
        let rows = std::iter::once(None).chain(entry.variants.iter().map(|v| Some(v.as_str())));
        for variant in rows {
            let Some(settings) = system.resolve(&entry.type_key, variant) else {
                continue;
            };
            let label = match variant {
                Some(v) => format!("  {}.{v}", entry.type_key),
                None => entry.type_key.clone(),
            };
            let rates: Vec<String> = (0..=3)
                .map(|level| {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let rate = simulate_drop_rate(&settings, level, TRIALS, &mut rng);
                    format!("{:>6.2}%", rate * 100.0)
                })
                .collect();
            println!("│ {label:<32} {}", rates.join(" "));
        }
    }
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();
}

fn run_round_trips(system: TrophySystem) -> bool {
    let heads: Vec<(String, Option<String>)> = system
        .catalog()
        .entries()
        .into_iter()
        .flat_map(|entry| {
            let type_key = entry.type_key.clone();
            std::iter::once((type_key.clone(), None)).chain(
                entry
                    .variants
                    .into_iter()
                    .map(move |v| (type_key.clone(), Some(v))),
            )
        })
        .collect();

    let (sender, receiver) = EventBus::create_pair(64);
    let mut listener = TrophyListener::new(system, MemoryBlockStores::new(), sender);
    let pos = BlockPos::new(0, 64, 0);
    let mut all_ok = true;

    println!("┌─ PLACE / BREAK ({CYCLES} cycles) ──────────────────────────────────────┐");
    for (type_key, variant) in heads {
        let mut head = match listener.system().issue_head(&type_key, variant.as_deref()) {
            Ok(head) => head,
            Err(e) => {
                println!("│ ✗ {type_key}: {e}");
                all_ok = false;
                continue;
            }
        };

        let mut certified = 0;
        for _ in 0..CYCLES {
            let material = head.material.name().to_string();
            listener.handle(HostEvent::HeadPlaced {
                pos,
                material: material.clone(),
                identity: head.clone(),
            });
            listener.handle(HostEvent::HeadBroken { pos, material });
            let Some(TrophyEvent::ReplaceBlockDrop { identity, .. }) = receiver.try_recv() else {
                break;
            };
            certified = identity
                .plain_lore()
                .iter()
                .filter(|line| *line == CERTIFICATION_LINE)
                .count();
            head = identity;
        }

        let name = head.display_name.as_ref().map(|n| n.plain()).unwrap_or_default();
        let label = match &variant {
            Some(v) => format!("{type_key}.{v}"),
            None => type_key.clone(),
        };
        if certified == 1 {
            println!("│ ✓ {label:<30} {name} ({})", head.material);
        } else {
            println!("│ ✗ {label:<30} certification lines: {certified}");
            all_ok = false;
        }
    }
    println!("└──────────────────────────────────────────────────────────────────┘");

    let stats = listener.system().stats();
    tracing::info!(kills = stats.kills, open_stores = listener.stores().len(), "simulation finished");
    all_ok
}
