//! End-to-end encounters driven through `CombatSession` with scripted dice
//! and a manual clock.

use std::sync::{Arc, Mutex};

use combat_core::round::Fighters;
use combat_core::{
    Attributes, BodyLocation, BrawlingAction, BrawlingState, CharacterSnapshot, CombatError,
    CombatSession, CombatSessionBuilder, CombatState, CombatType, Combatant, ItemSnapshot,
    LogKind, ManualClock, PlayerAction, RecordingDispatcher, ScriptedDice, Side, StoreAction,
    Timestamp, TurnPhase, Weapon, WeaponCombatState, WeaponModifiers, WeaponSlot,
};
use combat_core::resolution::{BrawlingOutcome, BrawlingResult};

type EndCalls = Arc<Mutex<Vec<(Side, String)>>>;

struct Harness {
    session: CombatSession,
    clock: ManualClock,
    store: RecordingDispatcher,
    ended: EndCalls,
}

impl Harness {
    fn new(player: Combatant, opponent: Combatant, dice: ScriptedDice) -> Self {
        Self::resumed(player, opponent, dice, None)
    }

    fn resumed(
        player: Combatant,
        opponent: Combatant,
        dice: ScriptedDice,
        prior: Option<CombatState>,
    ) -> Self {
        let clock = ManualClock::new(Timestamp(1_000));
        let store = RecordingDispatcher::new();
        let ended: EndCalls = Arc::default();
        let calls = Arc::clone(&ended);

        let session = CombatSession::builder(player, Some(opponent))
            .clock(clock.clone())
            .dice(dice)
            .dispatcher(store.clone())
            .on_combat_end(move |winner, text| {
                calls.lock().unwrap().push((winner, text.to_string()));
            })
            .resume(prior)
            .build()
            .expect("both participants present");

        Self {
            session,
            clock,
            store,
            ended,
        }
    }

    /// Let the opponent's delay elapse and resolve its counter.
    fn opponent_acts(&mut self) {
        self.clock.advance(self.session.config().opponent_delay_ms);
        self.session.poll().expect("opponent turn was due");
    }

    fn end_calls(&self) -> Vec<(Side, String)> {
        self.ended.lock().unwrap().clone()
    }
}

fn fighter(name: &str, strength: u32) -> Combatant {
    Combatant::new(name.to_lowercase(), name, Attributes::with_strength(strength))
}

fn bart(strength: u32) -> Combatant {
    fighter("Black Bart", strength).npc()
}

fn weapon_state(harness: &Harness) -> WeaponCombatState {
    match harness.session.state() {
        Some(CombatState::Weapon(state)) => state.clone(),
        other => panic!("expected weapon combat, got {other:?}"),
    }
}

#[test]
fn scenario_a_light_hit_then_counter() {
    // player: attack 45 (light hit at 60%), location 50 (chest)
    // opponent: attack 90 (miss)
    let mut h = Harness::new(fighter("Player", 15), bart(15), ScriptedDice::new([45, 50, 90]));
    h.session.select_combat_type(CombatType::Brawling).unwrap();

    let turn = h.session.submit(PlayerAction::Punch).unwrap();
    assert_eq!(turn.damage, 1);
    assert_eq!(h.session.opponent().current_strength(), 14);
    assert_eq!(turn.entry.kind, LogKind::Hit);
    assert!(turn.entry.text.contains("chest"));

    let state = h.session.state().unwrap();
    let hits: Vec<_> = state
        .round_log()
        .entries()
        .iter()
        .filter(|entry| entry.kind == LogKind::Hit)
        .collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(state.round(), 1);

    h.opponent_acts();
    let state = h.session.state().unwrap();
    assert_eq!(state.round(), 2);
    assert_eq!(state.round_log().len(), 2);
    assert_eq!(h.session.phase(), TurnPhase::AwaitingPlayerAction);

    let kinds = h.store.kinds();
    assert_eq!(
        kinds,
        vec![
            "SET_COMBAT_ACTIVE",
            "UPDATE_COMBAT_STATE",
            "SET_OPPONENT",
            "UPDATE_COMBAT_STATE",
            "UPDATE_COMBAT_STATE",
        ]
    );
}

#[test]
fn scenario_b_critical_knockout_ends_once() {
    // critical roll 1, location 95 (head), d4 = 3: (3 + 2) * 2 = 10 damage
    let mut h = Harness::new(fighter("Player", 12), bart(8), ScriptedDice::new([1, 95, 3]));
    h.session.select_combat_type(CombatType::Brawling).unwrap();

    let turn = h.session.submit(PlayerAction::Punch).unwrap();
    assert_eq!(turn.damage, 10);
    assert!(turn.knockout);
    assert_eq!(h.session.opponent().current_strength(), 0);
    assert!(h.session.opponent().is_unconscious);

    let calls = h.end_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Side::Player);
    assert!(calls[0].1.contains("victorious"));

    // nothing is scheduled after the summary
    assert_eq!(h.session.phase(), TurnPhase::Ended);
    h.clock.advance(10_000);
    assert!(h.session.poll().is_none());
    assert_eq!(
        h.session.submit(PlayerAction::Punch),
        Err(CombatError::CombatEnded)
    );
    assert_eq!(h.end_calls().len(), 1);

    let summary = h.session.summary().unwrap();
    assert_eq!(summary.winner, Side::Player);
    assert_eq!(summary.stats.damage_dealt, 10);
    assert_eq!(summary.stats.rounds, 1);
    let end_actions = h
        .store
        .actions()
        .into_iter()
        .filter(|action| matches!(action, StoreAction::EndCombat(_)))
        .count();
    assert_eq!(end_actions, 1);

    let returned = h.session.return_to_narrative().unwrap();
    assert_eq!(&returned, summary_of(&h));
    assert_eq!(h.store.kinds().last(), Some(&"SET_COMBAT_ACTIVE"));
}

fn summary_of(h: &Harness) -> &combat_core::CombatSummary {
    h.session.summary().unwrap()
}

#[test]
fn scenario_b_forced_outcome_clamps_strength() {
    let mut state = BrawlingState::new();
    let mut fighters = Fighters::new(fighter("Player", 15), bart(8));
    let turn = state.apply_outcome(
        Side::Player,
        BrawlingOutcome::forced(
            BrawlingAction::Punch,
            BrawlingResult::CriticalHit,
            10,
            Some(BodyLocation::Head),
        ),
        &mut fighters,
        Timestamp(0),
    );
    assert_eq!(turn.target_strength, 0);
    assert!(fighters.opponent.is_unconscious);
    assert_eq!(turn.winner(), Some(Side::Player));
    assert_eq!(turn.entry.kind, LogKind::Critical);
    assert_eq!(state.round, 1);
}

#[test]
fn scenario_c_last_round_then_reload() {
    let colt = Weapon::colt_revolver();
    let mut player_slot = WeaponSlot::armed(colt.clone());
    player_slot.ammunition = Some(1);
    let prior = CombatState::Weapon(WeaponCombatState::new(
        player_slot,
        WeaponSlot::armed(colt.clone()),
        10,
    ));

    let dice = ScriptedDice::new([
        1, 30, 50, 3, // player: reliable, hit, chest, 3 damage
        1, 90, // opponent: reliable, miss
        1, 90, // opponent: reliable, miss
    ]);
    let mut h = Harness::resumed(
        fighter("Player", 15).with_weapon(colt.clone()),
        bart(15).with_weapon(colt),
        dice,
        Some(prior),
    );
    assert_eq!(h.session.combat_type(), Some(CombatType::Weapon));

    let turn = h.session.submit(PlayerAction::Fire).unwrap();
    assert_eq!(turn.damage, 3);
    assert_eq!(weapon_state(&h).player_weapon.ammunition, Some(0));
    h.opponent_acts();

    let rejected = h.session.submit(PlayerAction::Fire);
    assert_eq!(
        rejected,
        Err(CombatError::OutOfAmmunition { side: Side::Player })
    );
    assert!(!h.session.is_processing());

    h.session.submit(PlayerAction::Reload).unwrap();
    let state = weapon_state(&h);
    assert_eq!(state.player_weapon.ammunition, Some(6));
    assert_eq!(state.player_weapon.capacity(), Some(6));
    h.opponent_acts();
    assert!(
        h.session
            .inspect()
            .log
            .iter()
            .any(|entry| entry.text == "You reload the Colt Revolver (6/6).")
    );
}

#[test]
fn scenario_d_move_changes_range_without_damage() {
    let colt = Weapon::colt_revolver();
    let mut h = Harness::new(
        fighter("Player", 15).with_weapon(colt.clone()),
        bart(15).with_weapon(colt),
        ScriptedDice::default(),
    );
    h.session.select_combat_type(CombatType::Weapon).unwrap();
    assert_eq!(weapon_state(&h).current_range, 10);

    let turn = h.session.submit(PlayerAction::Move(20)).unwrap();
    assert_eq!(weapon_state(&h).current_range, 20);
    assert_eq!(turn.damage, 0);
    assert!(turn.wound.is_none());
    assert_eq!(turn.entry.kind, LogKind::Info);
    assert_eq!(
        turn.entry.text,
        "You move from range 10 to range 20 (accuracy modifier +0)."
    );
    assert_eq!(h.session.player().current_strength(), 15);
    assert_eq!(h.session.opponent().current_strength(), 15);
}

#[test]
fn scenario_e_unarmed_npc_gets_default_weapon() {
    let mut h = Harness::new(
        fighter("Player", 15).with_weapon(Weapon::colt_revolver()),
        bart(15),
        ScriptedDice::default(),
    );
    assert!(h.session.opponent().weapon.is_none());
    h.session.select_combat_type(CombatType::Weapon).unwrap();

    let state = weapon_state(&h);
    let slot = &state.opponent_weapon;
    assert_eq!(slot.weapon.as_ref().map(|w| w.name.as_str()), Some("Colt Revolver"));
    assert_eq!(slot.ammunition, slot.capacity());
    assert_eq!(slot.ammunition, Some(6));
    assert_eq!(state.round, 1);
    assert!(state.round_log.is_empty());
    assert_eq!(
        h.session.opponent().weapon.as_ref().map(|w| w.name.as_str()),
        Some("Colt Revolver")
    );
    assert!(
        h.store
            .actions()
            .iter()
            .any(|action| matches!(action, StoreAction::SetOpponent(c) if c.weapon.is_some()))
    );
}

#[test]
fn malfunction_blocks_fire_until_reload() {
    let colt = Weapon::colt_revolver();
    let dice = ScriptedDice::new([
        99, // player: jam
        1, 90, // opponent: reliable, miss
        1, 90, // opponent: reliable, miss
    ]);
    let mut h = Harness::new(
        fighter("Player", 15).with_weapon(colt.clone()),
        bart(15).with_weapon(colt),
        dice,
    );
    h.session.select_combat_type(CombatType::Weapon).unwrap();

    let turn = h.session.submit(PlayerAction::Attack).unwrap();
    assert_eq!(turn.entry.text, "Your Colt Revolver malfunctions!");
    h.opponent_acts();

    assert_eq!(
        h.session.submit(PlayerAction::Fire),
        Err(CombatError::WeaponMalfunctioned { side: Side::Player })
    );
    h.session.submit(PlayerAction::Reload).unwrap();
    h.opponent_acts();
    assert!(!weapon_state(&h).player_weapon.is_jammed());
}

#[test]
fn opponent_knockout_defeats_the_player() {
    // player misses; opponent crits for (4 + 2) * 2 + 1 = 13 against strength 5
    let mut h = Harness::new(
        fighter("Player", 5),
        bart(15),
        ScriptedDice::new([90, 1, 50, 4]),
    );
    h.session.select_combat_type(CombatType::Brawling).unwrap();
    h.session.submit(PlayerAction::Attack).unwrap();
    h.opponent_acts();

    let calls = h.end_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Side::Opponent);
    assert!(calls[0].1.contains("defeated"));
    assert!(h.session.player().is_unconscious);
    assert!(h.store.kinds().contains(&"SET_CHARACTER"));
    // the knockout happened during round 1's counter
    assert_eq!(h.session.summary().map(|s| s.stats.rounds), Some(1));
}

#[test]
fn resume_with_knocked_out_opponent_ends_immediately() {
    let prior = CombatState::Brawling(BrawlingState {
        round: 4,
        ..BrawlingState::new()
    });
    let mut opponent = bart(6);
    opponent.is_unconscious = true;

    let h = Harness::resumed(fighter("Player", 15), opponent, ScriptedDice::default(), Some(prior));
    assert!(h.session.is_ended());
    assert_eq!(h.end_calls().len(), 1);
    assert_eq!(h.session.summary().map(|s| s.stats.rounds), Some(4));
}

#[test]
fn grapple_is_offered_only_in_brawling() {
    let mut h = Harness::new(fighter("Player", 15), bart(15), ScriptedDice::default());
    h.session.select_combat_type(CombatType::Weapon).unwrap();
    assert_eq!(
        h.session.submit(PlayerAction::Grapple),
        Err(CombatError::ActionNotAvailable {
            action: "grapple",
            mode: "weapon",
        })
    );
}

#[test]
fn malformed_npc_weapon_is_noted_and_replaced_by_the_default() {
    let player = CharacterSnapshot {
        inventory: vec![ItemSnapshot::weapon(
            "Colt Revolver",
            WeaponModifiers {
                damage: Some("1d6".into()),
                range: Some(20),
                accuracy: Some(0),
                ammunition: Some(6),
                ..WeaponModifiers::default()
            },
        )],
        equipped_weapon: Some("Colt Revolver".into()),
        ..CharacterSnapshot::new("p", "Player", Attributes::with_strength(15))
    };
    let opponent = CharacterSnapshot {
        is_npc: true,
        inventory: vec![ItemSnapshot::weapon(
            "Rifle",
            WeaponModifiers {
                range: Some(60),
                accuracy: Some(5),
                ..WeaponModifiers::default()
            },
        )],
        equipped_weapon: Some("Rifle".into()),
        ..CharacterSnapshot::new("o", "Black Bart", Attributes::with_strength(15))
    };

    let mut session = CombatSessionBuilder::from_snapshots(&player, Some(&opponent))
        .clock(ManualClock::new(Timestamp(0)))
        // player: reliable, miss
        .dice(ScriptedDice::new([1, 90]))
        .build()
        .expect("both participants present");

    let expected = "Black Bart: weapon `Rifle` is missing `damage`";
    assert_eq!(session.diagnostics().to_vec(), vec![expected.to_string()]);
    assert!(
        session
            .inspect()
            .log
            .iter()
            .any(|entry| entry.text == format!("Note: {expected}"))
    );
    assert!(session.opponent().weapon.is_none());
    assert!(session.player().weapon.is_some());

    session.select_combat_type(CombatType::Weapon).unwrap();
    let Some(CombatState::Weapon(state)) = session.state() else {
        panic!("expected weapon combat");
    };
    assert_eq!(
        state.opponent_weapon.weapon.as_ref().map(|w| w.name.as_str()),
        Some("Colt Revolver")
    );

    session.submit(PlayerAction::Fire).unwrap();
    assert!(session.is_processing());
    assert!(!session.is_ended());
}

#[test]
fn resume_with_range_off_the_slider_starts_fresh() {
    let colt = Weapon::colt_revolver();
    let mut prior = WeaponCombatState::new(
        WeaponSlot::armed(colt.clone()),
        WeaponSlot::armed(colt.clone()),
        10,
    );
    prior.current_range = 2_000_000_000;

    // player: reliable, miss; opponent: reliable, miss
    let mut h = Harness::resumed(
        fighter("Player", 15).with_weapon(colt.clone()),
        bart(15).with_weapon(colt),
        ScriptedDice::new([1, 90, 1, 90]),
        Some(CombatState::Weapon(prior)),
    );
    assert_eq!(h.session.combat_type(), None);
    assert_eq!(
        h.session.diagnostics().to_vec(),
        vec!["resume skipped: range 2000000000 is outside 1..=100".to_string()]
    );
    assert!(
        h.session
            .inspect()
            .log
            .iter()
            .any(|entry| entry.text.starts_with("Note: resume skipped"))
    );

    h.session.select_combat_type(CombatType::Weapon).unwrap();
    assert_eq!(weapon_state(&h).current_range, 10);
    h.session.submit(PlayerAction::Fire).unwrap();
    h.opponent_acts();
    assert_eq!(weapon_state(&h).round, 2);
}

#[test]
fn oversized_damage_dice_are_rejected_at_load() {
    let gunman = CharacterSnapshot {
        inventory: vec![ItemSnapshot::weapon(
            "Hand Cannon",
            WeaponModifiers {
                damage: Some("1d2147483647".into()),
                range: Some(20),
                accuracy: Some(0),
                ..WeaponModifiers::default()
            },
        )],
        equipped_weapon: Some("Hand Cannon".into()),
        ..CharacterSnapshot::new("p", "Player", Attributes::with_strength(15))
    };
    let target = CharacterSnapshot {
        is_npc: true,
        ..CharacterSnapshot::new("o", "Black Bart", Attributes::with_strength(15))
    };

    let session = CombatSessionBuilder::from_snapshots(&gunman, Some(&target))
        .build()
        .expect("both participants present");
    assert!(session.player().weapon.is_none());
    assert_eq!(session.diagnostics().len(), 1);
    assert!(session.diagnostics()[0].contains("Hand Cannon"));
}

#[test]
fn critical_with_a_huge_die_does_not_overflow() {
    let mut cannon = Weapon::colt_revolver();
    cannon.damage = "1d1000".into();
    // player: reliable, critical roll 1, location 50, max die
    let mut h = Harness::new(
        fighter("Player", 15).with_weapon(cannon),
        bart(15),
        ScriptedDice::new([1, 1, 50, 1000]),
    );
    h.session.select_combat_type(CombatType::Weapon).unwrap();

    let turn = h.session.submit(PlayerAction::Fire).unwrap();
    assert_eq!(turn.damage, 2000);
    assert!(turn.knockout);
    assert_eq!(h.session.summary().map(|s| s.stats.damage_dealt), Some(2000));
}
