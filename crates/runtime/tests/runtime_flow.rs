//! Runtime pacing, cancellation and provider-driven flow under paused time.

use std::time::Duration;

use combat_core::{
    Attributes, CombatSession, CombatType, Combatant, PlayerAction, ScriptedDice, Side, TurnPhase,
};
use combat_runtime::{
    CombatEvent, Event, PlayerIntent, Runtime, RuntimeConfig, RuntimeError, ScriptedProvider,
    Topic,
};
use tokio::sync::broadcast;
use tokio::time::Instant;

fn fighter(name: &str, strength: u32) -> Combatant {
    Combatant::new(name.to_lowercase(), name, Attributes::with_strength(strength))
}

fn bart(strength: u32) -> Combatant {
    fighter("Black Bart", strength).npc()
}

async fn runtime(player: Combatant, opponent: Combatant, dice: ScriptedDice) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig::default().with_seed(7))
        .session(CombatSession::builder(player, Some(opponent)))
        .dice(dice)
        .build()
        .await
        .expect("runtime builds")
}

async fn next_combat_event(rx: &mut broadcast::Receiver<Event>) -> CombatEvent {
    loop {
        match rx.recv().await.expect("combat topic open") {
            Event::Combat(event) => return event,
            Event::Store(_) => continue,
        }
    }
}

#[tokio::test(start_paused = true)]
async fn opponent_replies_after_the_configured_delay() {
    // both sides miss: one d100 each
    let runtime = runtime(fighter("Player", 12), bart(12), ScriptedDice::new([90, 90])).await;
    let handle = runtime.handle();
    let mut combat_rx = handle.subscribe(Topic::Combat);

    handle
        .select_combat_type(CombatType::Brawling)
        .await
        .expect("type selects");
    assert!(matches!(
        next_combat_event(&mut combat_rx).await,
        CombatEvent::TypeSelected {
            combat_type: CombatType::Brawling
        }
    ));

    let started = Instant::now();
    let turn = handle.submit(PlayerAction::Punch).await.expect("punch resolves");
    assert_eq!(turn.actor, Side::Player);

    let snapshot = handle.inspect().await.expect("snapshot");
    assert!(snapshot.is_processing);
    assert_eq!(
        handle.submit(PlayerAction::Punch).await.map(|_| ()).map_err(|e| e.is_rejection()),
        Err(true)
    );

    let mut opponent_turn = None;
    while opponent_turn.is_none() {
        if let CombatEvent::TurnResolved { actor: Side::Opponent, entry, .. } =
            next_combat_event(&mut combat_rx).await
        {
            opponent_turn = Some(entry);
        }
    }

    assert!(started.elapsed() >= Duration::from_millis(1_000));
    let snapshot = handle.inspect().await.expect("snapshot");
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerAction);
    assert!(!snapshot.is_processing);
    assert_eq!(snapshot.state.map(|state| state.round()), Some(2));
}

#[tokio::test(start_paused = true)]
async fn cancel_pending_drops_the_opponent_turn() {
    let runtime = runtime(fighter("Player", 12), bart(12), ScriptedDice::new([90, 90])).await;
    let handle = runtime.handle();

    handle.select_combat_type(CombatType::Brawling).await.unwrap();
    handle.submit(PlayerAction::Punch).await.unwrap();

    assert!(handle.cancel_pending().await.unwrap());
    assert!(!handle.cancel_pending().await.unwrap());

    tokio::time::sleep(Duration::from_secs(5)).await;
    let snapshot = handle.inspect().await.unwrap();
    assert_eq!(snapshot.phase, TurnPhase::AwaitingPlayerAction);
    assert!(!snapshot.is_processing);
    // the round only advances once the opponent has answered
    assert_eq!(snapshot.state.map(|state| state.round()), Some(1));
}

#[tokio::test(start_paused = true)]
async fn shutdown_abandons_a_scheduled_turn() {
    let runtime = runtime(fighter("Player", 12), bart(12), ScriptedDice::new([90, 90])).await;
    let handle = runtime.handle();
    let mut combat_rx = handle.subscribe(Topic::Combat);

    handle.select_combat_type(CombatType::Brawling).await.unwrap();
    handle.submit(PlayerAction::Punch).await.unwrap();
    drop(handle);

    runtime.shutdown().await.expect("worker joins");

    let mut opponent_turns = 0;
    let mut scheduled = 0;
    loop {
        match combat_rx.recv().await {
            Ok(Event::Combat(CombatEvent::TurnResolved { actor: Side::Opponent, .. })) => {
                opponent_turns += 1;
            }
            Ok(Event::Combat(CombatEvent::OpponentScheduled { .. })) => scheduled += 1,
            Ok(_) => {}
            Err(broadcast::error::RecvError::Closed) => break,
            Err(broadcast::error::RecvError::Lagged(_)) => {}
        }
    }
    assert_eq!(scheduled, 1);
    assert_eq!(opponent_turns, 0);
}

#[tokio::test(start_paused = true)]
async fn provider_drives_combat_back_to_the_narrative() {
    // critical roll 1, location 95, d4 = 3: 10 damage knocks out strength 8
    let mut runtime = runtime(fighter("Player", 12), bart(8), ScriptedDice::new([1, 95, 3])).await;
    let handle = runtime.handle();
    let mut combat_rx = handle.subscribe(Topic::Combat);
    let mut store_rx = handle.subscribe(Topic::Store);

    runtime.set_player_provider(ScriptedProvider::new([
        PlayerIntent::Act(PlayerAction::Fire),
        PlayerIntent::SelectCombatType(CombatType::Brawling),
        PlayerIntent::Act(PlayerAction::Punch),
        PlayerIntent::ReturnToNarrative,
    ]));

    let summary = runtime.run().await.expect("combat completes");
    assert_eq!(summary.winner, Side::Player);
    assert!(summary.results.contains("victorious"));
    assert_eq!(summary.stats.damage_dealt, 10);

    match next_combat_event(&mut combat_rx).await {
        CombatEvent::ActionRejected { request, code, .. } => {
            assert_eq!(request, "fire");
            assert!(!code.is_empty());
        }
        other => panic!("expected the early fire to be rejected, got {other:?}"),
    }

    let mut kinds = Vec::new();
    while let Ok(Event::Store(action)) = store_rx.try_recv() {
        kinds.push(action.kind());
    }
    assert_eq!(kinds.iter().filter(|kind| **kind == "END_COMBAT").count(), 1);
    assert_eq!(kinds.last(), Some(&"SET_COMBAT_ACTIVE"));
}

#[tokio::test]
async fn exhausted_provider_surfaces_as_an_error() {
    let mut runtime = runtime(fighter("Player", 12), bart(12), ScriptedDice::default()).await;
    runtime.set_player_provider(ScriptedProvider::new([]));
    assert!(matches!(
        runtime.run().await,
        Err(RuntimeError::ActionProviderChannelClosed)
    ));
}

#[tokio::test]
async fn building_without_an_opponent_fails() {
    let result = Runtime::builder()
        .session(CombatSession::builder(fighter("Player", 12), None))
        .build()
        .await;
    assert!(matches!(result, Err(RuntimeError::MissingOpponent)));

    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingCombatants)));
}
