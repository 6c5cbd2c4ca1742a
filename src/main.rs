//! Duel Arena Server
//!
//! Runs a scripted demo session against the in-memory host: a handful of
//! players, a menu-driven challenge, one fought-out duel and one forfeit,
//! then the resulting standings.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use duel_arena::{
    duel::{Command, DuelConfig, DuelLifecycle, WorldEvent},
    sim::SimHost,
    world::{ItemStack, Location, PlayerId},
    Host, MenuKind, TICK_RATE, VERSION, RATING_OBJECTIVE, WINS_OBJECTIVE,
};

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Duel Arena Server v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    demo_session();
}

/// Scripted session exercising the full duel lifecycle.
fn demo_session() {
    info!("=== Starting Demo Session ===");

    let mut host = SimHost::new();
    let mira = host.add_player("Mira", Location::overworld(120.0, 64.0, -30.0));
    let bren = host.add_player("Bren", Location::overworld(-45.0, 70.0, 210.0));
    let sola = host.add_player("Sola", Location::overworld(8.0, 64.0, 8.0));
    let tarn = host.add_player("Tarn", Location::overworld(300.0, 90.0, 300.0));

    host.give_item(mira, 0, ItemStack::single("iron_sword"));
    host.give_item(mira, 8, ItemStack::new("golden_apple", 3));
    host.give_item(bren, 0, ItemStack::single("bow"));
    host.give_item(bren, 9, ItemStack::new("arrow", 64));
    host.give_item(sola, 0, ItemStack::single("diamond_axe"));
    host.give_item(tarn, 0, ItemStack::single("trident"));

    let mut lifecycle = DuelLifecycle::new(host, DuelConfig::default());

    // --- Duel 1: menu-driven challenge, resolved by a kill ---

    lifecycle.on_command(mira, Command::Pvp);
    lifecycle.on_menu_response(mira, Some(0)); // Challenge Player
    let target_index = pick_candidate(&lifecycle, mira, bren);
    lifecycle.on_menu_response(mira, Some(target_index));

    lifecycle.on_command(bren, Command::Pvp);
    lifecycle.on_menu_response(bren, Some(1)); // Pending Requests
    lifecycle.on_menu_response(bren, Some(0)); // Accept Mira

    info!(
        "active duels after accept: {}",
        lifecycle.registry().active_duels()
    );

    lifecycle.host_mut().hurt(bren, 20.0);
    lifecycle.on_event(WorldEvent::PlayerDeath {
        victim: bren,
        killer: Some(mira),
    });

    run_ticks(&mut lifecycle, 50);

    // --- Duel 2: direct start, resolved by disconnect ---

    lifecycle
        .start_duel(sola, tarn)
        .expect("both players are free");
    lifecycle.host_mut().set_online(tarn, false);
    lifecycle.on_event(WorldEvent::PlayerQuit { player: tarn });

    // Tarn reconnects and gets their pre-duel state back
    lifecycle.host_mut().set_online(tarn, true);
    lifecycle.on_event(WorldEvent::PlayerJoin { player: tarn });

    run_ticks(&mut lifecycle, 10);

    // --- Results ---

    info!("=== Session Results ===");
    for (name, score) in lifecycle.host().counter_entries(WINS_OBJECTIVE) {
        info!("wins  {name}: {score}");
    }
    for (name, score) in lifecycle.host().counter_entries(RATING_OBJECTIVE) {
        info!("elo   {name}: {score}");
    }

    match serde_json::to_string_pretty(lifecycle.history()) {
        Ok(json) => info!("outcome history:\n{json}"),
        Err(err) => info!("failed to serialize history: {err}"),
    }
}

/// Index of `target` in the opponent-selection menu last shown to `viewer`.
fn pick_candidate(lifecycle: &DuelLifecycle<SimHost>, viewer: PlayerId, target: PlayerId) -> usize {
    let menu = lifecycle
        .host()
        .last_menu(viewer)
        .expect("menu was just shown");
    let MenuKind::OpponentSelect { candidates } = &menu.kind else {
        panic!("expected opponent selection menu");
    };
    candidates
        .iter()
        .position(|id| *id == target)
        .expect("target is online")
}

fn run_ticks(lifecycle: &mut DuelLifecycle<SimHost>, ticks: u64) {
    for _ in 0..ticks {
        lifecycle.on_tick();
    }
}
