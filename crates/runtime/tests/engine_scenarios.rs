//! End-to-end routing scenarios for the hybrid engine.
//!
//! Each scenario drives [`HybridEngine::tick`] with hand-built snapshots whose
//! layer scores land in a known urgency band, then checks which path produced
//! the decision and whether the advisor was touched.

use std::sync::Arc;
use std::time::Duration;

use decision_runtime::{
    Action, AdvisorConfig, AdvisorEvent, AdvisorResponse, Aggressiveness, DecisionMaker,
    EngineConfig, Event, ExternalAdvisor, FusionType, HeroBehavior, HybridEngine, ManualClock,
    Route, ScriptedBackend, ScriptedReply, TickInput, Topic, UrgencyMode,
};
use game_core::{
    AbilitySlot, AbilityState, AiConfig, Difficulty, EnemySnapshot, EntityId, GameState,
    HeroState, Team, TeamState, Unit, Vec2, WaveState, WorldView,
};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

const AGENT: EntityId = EntityId(1);
const SEED: u64 = 11;

// ============================================================================
// Fixtures
// ============================================================================

fn advisor_config() -> AdvisorConfig {
    AdvisorConfig {
        enabled: true,
        timeout_ms: 50,
        probe_timeout_ms: 50,
        max_attempts: 1,
        retry_delay_ms: 1,
        cooldown_ms: 3000,
        ..AdvisorConfig::default()
    }
}

fn engine_config() -> EngineConfig {
    EngineConfig {
        rng_seed: Some(SEED),
        ..EngineConfig::default()
    }
}

fn engine_with(
    clock: &ManualClock,
    backend: Option<Arc<ScriptedBackend>>,
) -> (HybridEngine, Option<Arc<ExternalAdvisor>>) {
    let mut builder = HybridEngine::builder()
        .config(engine_config())
        .clock(clock.clone());

    let advisor = backend.map(|backend| Arc::new(ExternalAdvisor::new(backend, advisor_config())));
    if let Some(advisor) = &advisor {
        builder = builder
            .advisor(Arc::clone(advisor))
            .runtime(Handle::current());
    }

    let mut engine = builder.build().expect("engine should build");
    engine
        .register_agent(AGENT, Difficulty::Normal)
        .expect("agent should register");
    (engine, advisor)
}

/// Hero under pressure but alive: 45% health, no escape, two abilities down.
fn pressured_hero() -> HeroState {
    HeroState {
        has_escape_route: false,
        is_cc_vulnerable: true,
        has_mana_for_combo: false,
        item_on_cooldown: true,
        time_since_base: 200.0,
        death_streak: 3,
        ..HeroState::new(AGENT, Team::Blue, Vec2::ZERO)
    }
    .with_health(45.0, 270.0)
    .with_mana(10.0)
    .with_ability(AbilitySlot::Escape, AbilityState::on_cooldown(1, 8.0))
    .with_ability(AbilitySlot::Ultimate, AbilityState::on_cooldown(1, 40.0))
}

fn three_cc_enemies() -> Vec<EnemySnapshot> {
    (2..5)
        .map(|id| {
            let mut enemy = EnemySnapshot::new(EntityId(id), 300.0, 60.0).with_cc();
            enemy.has_wall_stun = true;
            enemy
        })
        .collect()
}

/// Scores ~71.8 at Normal: survival 75, combat 100, resource 60, objective 80,
/// position 65, team 45, skills 47, rotation 50, momentum 55, predictive 90.
fn urgent_game() -> GameState {
    GameState {
        nearby_enemies: three_cc_enemies(),
        score_differential: -1,
        gold_differential: -3000,
        tower_under_attack: true,
        objective_threat: true,
        teammate_critical: true,
        enemy_missing_duration: 20.0,
        incoming_cc_chain: true,
        predicted_enemy_gank: true,
        objective_contest_soon: true,
        wave_state: WaveState::Pushed,
        movement_restricted: true,
        near_wall: true,
        ..GameState::default()
    }
}

/// Same as [`urgent_game`] without the forecast flags: ~65.4, Planning.
fn planning_game() -> GameState {
    GameState {
        incoming_cc_chain: false,
        predicted_enemy_gank: false,
        objective_contest_soon: false,
        ..urgent_game()
    }
}

fn worn_team() -> TeamState {
    TeamState {
        average_hp: 30.0,
        alive_count: 4,
    }
}

/// Agent at 45% surrounded by three enemy heroes.
fn outnumbered_world() -> WorldView {
    WorldView::new(
        Unit::hero(AGENT, Team::Blue, Vec2::ZERO).with_health(270.0, 600.0),
        Vec2::new(-3000.0, 0.0),
    )
    .with_units((2..5).map(|id| Unit::hero(EntityId(id), Team::Red, Vec2::new(300.0, 0.0))))
}

/// Healthy agent facing one enemy hero at 15% health.
fn kill_window_world() -> WorldView {
    WorldView::new(
        Unit::hero(AGENT, Team::Blue, Vec2::ZERO).with_health(540.0, 600.0),
        Vec2::new(-3000.0, 0.0),
    )
    .with_units([Unit::hero(EntityId(2), Team::Red, Vec2::new(350.0, 0.0)).with_health(90.0, 600.0)])
}

fn urgent_input() -> TickInput {
    TickInput::new(pressured_hero(), urgent_game(), worn_team(), outnumbered_world())
}

fn planning_input() -> TickInput {
    TickInput::new(pressured_hero(), planning_game(), worn_team(), outnumbered_world())
}

async fn next_completion(events: &mut broadcast::Receiver<Event>) -> AdvisorResponse {
    let wait = async {
        loop {
            match events.recv().await {
                Ok(Event::Advisor(AdvisorEvent::Completed { response, .. })) => return response,
                Ok(_) => continue,
                Err(error) => panic!("advisor topic closed: {error}"),
            }
        }
    };

    tokio::time::timeout(Duration::from_secs(2), wait)
        .await
        .expect("advisor query should complete")
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn extreme_urgency_retreats_without_consulting_advisor() {
    let clock = ManualClock::new(1_000);
    let backend = Arc::new(ScriptedBackend::new([ScriptedReply::text("ALL_IN | go | 0.9")]));
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(advisor.refresh_availability().await);

    let mut advisor_events = engine.subscribe(Topic::Advisor);

    // ========================================================================
    // 8% health with an enemy in range trips the override
    // ========================================================================
    let hero = HeroState::new(AGENT, Team::Blue, Vec2::ZERO).with_health(8.0, 48.0);
    let game = GameState {
        nearby_enemies: vec![EnemySnapshot::new(EntityId(2), 300.0, 60.0)],
        in_warded_area: true,
        ..GameState::default()
    };
    let world = WorldView::new(
        Unit::hero(AGENT, Team::Blue, Vec2::ZERO).with_health(48.0, 600.0),
        Vec2::new(-3000.0, 0.0),
    )
    .with_units([Unit::hero(EntityId(2), Team::Red, Vec2::new(300.0, 0.0))]);

    let outcome = engine
        .tick(AGENT, &TickInput::new(hero, game, TeamState::default(), world))
        .expect("tick should succeed");

    assert_eq!(outcome.evaluation.mode, UrgencyMode::ExtremeUrgent);
    assert!(outcome.evaluation.score >= 90.0);
    assert_eq!(outcome.route, Route::Reflex);
    assert_eq!(outcome.decision.action, Action::Retreat);
    assert_eq!(outcome.state, HeroBehavior::Retreating);

    // ========================================================================
    // Nothing was sent out or cached
    // ========================================================================
    tokio::task::yield_now().await;
    assert_eq!(backend.calls(), 0);
    assert!(advisor_events.try_recv().is_err());
    assert!(engine.cache().is_empty());
}

#[tokio::test]
async fn urgent_with_advisor_down_decides_locally_with_balanced_posture() {
    let clock = ManualClock::new(5_000);
    let backend = Arc::new(ScriptedBackend::new([]).unreachable());
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(!advisor.refresh_availability().await);

    let input = TickInput::new(pressured_hero(), urgent_game(), worn_team(), kill_window_world());
    let outcome = engine.tick(AGENT, &input).expect("tick should succeed");

    assert_eq!(outcome.evaluation.mode, UrgencyMode::Urgent);
    assert_eq!(outcome.route, Route::Local);
    assert_eq!(outcome.decision.fusion, None);

    // A lone low-health enemy is an all-in under balanced play; passive play
    // never believes it has the advantage.
    assert_eq!(outcome.decision.action, Action::AllIn);
    assert_eq!(outcome.decision.target, Some(EntityId(2)));

    let mut reference = DecisionMaker::new(AiConfig::new(Difficulty::Normal), Some(SEED ^ 1));
    let expected = reference.decide(&input.world, Aggressiveness::Balanced, None, 5_000, true);
    assert_eq!(outcome.decision, expected);

    tokio::task::yield_now().await;
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn urgent_query_prewarms_cache_for_next_urgent_tick() {
    let clock = ManualClock::new(10_000);
    let backend = Arc::new(ScriptedBackend::new([ScriptedReply::text(
        "ATTACK | collapse on the isolated carry | 0.9",
    )]));
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(advisor.refresh_availability().await);

    let mut advisor_events = engine.subscribe(Topic::Advisor);
    let input = urgent_input();

    // ========================================================================
    // Tick 1: cache miss, local retreat, query launched
    // ========================================================================
    let first = engine.tick(AGENT, &input).expect("first tick");
    assert_eq!(first.evaluation.mode, UrgencyMode::Urgent);
    assert!((70.0..85.0).contains(&first.evaluation.score));
    assert_eq!(first.route, Route::AdvisorLaunched);
    assert_eq!(first.decision.action, Action::Retreat);
    assert!(engine.cache().is_empty());

    let response = next_completion(&mut advisor_events).await;
    assert_eq!(response.decision, "ATTACK");
    assert_eq!(response.provider, "scripted");
    assert_eq!(backend.calls(), 1);

    // ========================================================================
    // Tick 2 (40 ms later): completion folded in, then served from cache
    // ========================================================================
    clock.advance(40);
    let second = engine.tick(AGENT, &input).expect("second tick");

    assert_eq!(second.evaluation.mode, UrgencyMode::Urgent);
    assert_eq!(second.route, Route::CacheHit);
    assert_eq!(second.decision.action, Action::Attack);
    assert_eq!(second.decision.fusion, Some(FusionType::ExternalDominant));
    assert_eq!(second.decision.reasoning, "collapse on the isolated carry");
    assert_eq!(engine.cache().len(), 1);

    // ========================================================================
    // Tick 3 (past the freshness window): local again, cooldown blocks query
    // ========================================================================
    clock.advance(200);
    let third = engine.tick(AGENT, &input).expect("third tick");

    assert_eq!(third.route, Route::Local);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn planning_launches_once_per_cooldown() {
    let clock = ManualClock::new(20_000);
    let backend = Arc::new(ScriptedBackend::new([
        ScriptedReply::text("FARM | safe"),
        ScriptedReply::text("FARM | safe"),
    ]));
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(advisor.refresh_availability().await);

    let mut advisor_events = engine.subscribe(Topic::Advisor);
    let input = planning_input();

    let first = engine.tick(AGENT, &input).expect("first tick");
    assert_eq!(first.evaluation.mode, UrgencyMode::Planning);
    assert_eq!(first.route, Route::AdvisorLaunched);
    next_completion(&mut advisor_events).await;

    // Inside the 3 s cooldown
    clock.advance(1_000);
    let second = engine.tick(AGENT, &input).expect("second tick");
    assert_eq!(second.route, Route::Local);

    // Cooldown elapsed
    clock.advance(2_500);
    let third = engine.tick(AGENT, &input).expect("third tick");
    assert_eq!(third.route, Route::AdvisorLaunched);
    next_completion(&mut advisor_events).await;

    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn advisor_timeout_degrades_to_local_decision_in_cache() {
    let clock = ManualClock::new(30_000);
    let backend = Arc::new(ScriptedBackend::new([ScriptedReply::delayed(
        "ALL_IN | too late | 0.95",
        Duration::from_millis(500),
    )]));
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(advisor.refresh_availability().await);

    let mut advisor_events = engine.subscribe(Topic::Advisor);
    let input = urgent_input();

    let first = engine.tick(AGENT, &input).expect("first tick");
    assert_eq!(first.route, Route::AdvisorLaunched);

    let response = next_completion(&mut advisor_events).await;
    assert!(response.is_fallback());

    clock.advance(10);
    let second = engine.tick(AGENT, &input).expect("second tick");

    // The fallback fuses to the local decision, which is what gets cached.
    assert_eq!(second.route, Route::CacheHit);
    assert_eq!(second.decision.action, Action::Retreat);
    assert_eq!(second.decision.fusion, None);
}

#[tokio::test]
async fn calm_tick_is_passive_and_never_queries() {
    let clock = ManualClock::new(0);
    let backend = Arc::new(ScriptedBackend::new([]));
    let (mut engine, advisor) = engine_with(&clock, Some(Arc::clone(&backend)));
    let advisor = advisor.expect("advisor configured");
    assert!(advisor.refresh_availability().await);

    let input = TickInput::new(
        HeroState::new(AGENT, Team::Blue, Vec2::ZERO),
        GameState {
            in_warded_area: true,
            ..GameState::default()
        },
        TeamState::default(),
        WorldView::new(Unit::hero(AGENT, Team::Blue, Vec2::ZERO), Vec2::ZERO),
    );

    for _ in 0..5 {
        let outcome = engine.tick(AGENT, &input).expect("tick should succeed");
        assert_eq!(outcome.evaluation.mode, UrgencyMode::Local);
        assert_eq!(outcome.route, Route::Passive);
        clock.advance(250);
    }

    tokio::task::yield_now().await;
    assert_eq!(backend.calls(), 0);
}

#[test]
fn local_only_engine_needs_no_runtime() {
    let clock = ManualClock::new(0);
    let (mut engine, advisor) = engine_with(&clock, None);
    assert!(advisor.is_none());
    assert!(engine.advisor().is_none());

    let outcome = engine.tick(AGENT, &urgent_input()).expect("tick should succeed");
    assert_eq!(outcome.evaluation.mode, UrgencyMode::Urgent);
    assert_eq!(outcome.route, Route::Local);
    assert_eq!(outcome.state, HeroBehavior::Retreating);
}
