use lootflip_core::{
    EventBus, GameConfig, GameOverReason, JokerKind, Loot, Phase, RunError, RunState,
    ScriptedSource, Side, SlotKind, TurnResult,
};

// Draw order: `start_next_turn` consumes one hazard-presence draw, plus one
// placement draw when a hazard lands; a treasure flip consumes one
// joker-vs-number draw, then one pick within that family.
const NO_HAZARD: f64 = 0.99;
const HAZARD: f64 = 0.0;
const PLACE_LEFT: f64 = 0.0;
const PLACE_RIGHT: f64 = 0.9;
const NO_JOKER: f64 = 0.9;
const JOKER: f64 = 0.0;

fn number(value: u8) -> f64 {
    (f64::from(value) - 0.5) / 7.0
}

fn joker(kind: JokerKind) -> f64 {
    let idx = JokerKind::ALL.iter().position(|k| *k == kind).unwrap();
    (idx as f64 + 0.5) / 3.0
}

fn scripted_run(draws: Vec<f64>) -> (RunState, EventBus) {
    let run = RunState::with_rng(GameConfig::default(), Box::new(ScriptedSource::new(draws)));
    (run, EventBus::default())
}

#[test]
fn fresh_flip_collects_new_number() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_JOKER, number(3)]);
    assert_eq!(
        run.start_next_turn(&mut events).unwrap(),
        TurnResult::Ready
    );
    let result = run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::Treasure {
            loot: Loot::Number(3),
            duplicate_busted: false,
            shield_saved: false,
            game_over: false,
            turns_left: 39,
        }
    );
    assert!(run.state.uniques.contains(&3));
    assert_eq!(run.state.streak, 1);
    assert_eq!(run.state.turns_left, 39);
    assert_eq!(run.state.phase, Phase::AwaitingNextTurn);
}

#[test]
fn hazard_placement_follows_the_coin() {
    let (mut run, mut events) = scripted_run(vec![HAZARD, PLACE_LEFT]);
    run.start_next_turn(&mut events).unwrap();
    assert_eq!(run.state.left_slot, SlotKind::Hazard);
    assert_eq!(run.state.right_slot, SlotKind::Treasure);

    let (mut run, mut events) = scripted_run(vec![HAZARD, PLACE_RIGHT]);
    run.start_next_turn(&mut events).unwrap();
    assert_eq!(run.state.left_slot, SlotKind::Treasure);
    assert_eq!(run.state.right_slot, SlotKind::Hazard);
}

#[test]
fn at_most_one_slot_hides_a_hazard_across_a_whole_game() {
    let mut run = RunState::new(GameConfig::default(), 0xC0FFEE);
    let mut events = EventBus::default();
    let mut flips = 0u32;
    loop {
        match run.start_next_turn(&mut events).unwrap() {
            TurnResult::Ready => {}
            TurnResult::GameOver { .. } => break,
            other => panic!("unexpected result {other:?}"),
        }
        let both = run.state.left_slot == SlotKind::Hazard
            && run.state.right_slot == SlotKind::Hazard;
        assert!(!both);

        let before = run.state.turns_left;
        run.flip(Side::Left, &mut events).unwrap();
        assert_eq!(run.state.turns_left, before - 1);
        flips += 1;
        if run.state.phase == Phase::GameOver {
            break;
        }
    }
    assert!(flips <= GameConfig::default().max_turns);
}

#[test]
fn duplicate_without_defenses_busts_the_run() {
    let (mut run, mut events) = scripted_run(vec![
        NO_HAZARD,
        NO_JOKER,
        number(3),
        NO_HAZARD,
        NO_JOKER,
        number(3),
    ]);
    run.start_next_turn(&mut events).unwrap();
    run.flip(Side::Left, &mut events).unwrap();
    run.start_next_turn(&mut events).unwrap();
    let result = run.flip(Side::Right, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::Treasure {
            loot: Loot::Number(3),
            duplicate_busted: true,
            shield_saved: false,
            game_over: false,
            turns_left: 38,
        }
    );
    assert!(run.state.uniques.is_empty());
    assert_eq!(run.state.streak, 0);
    assert_eq!(run.state.lives, 3);
}

#[test]
fn shield_saves_a_hazard_hit() {
    let (mut run, mut events) = scripted_run(vec![HAZARD, PLACE_LEFT]);
    run.start_next_turn(&mut events).unwrap();
    run.state.has_shield = true;
    run.state.streak = 4;
    run.state.uniques.extend([2, 6]);

    let result = run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::HazardHit {
            shield_saved: true,
            game_over: false,
            reason: None,
            turns_left: 39,
        }
    );
    assert!(!run.state.has_shield);
    assert_eq!(run.state.lives, 3);
    assert_eq!(run.state.streak, 0);
    // A shielded hit is not a bust: the collected set survives.
    assert_eq!(run.state.unique_count(), 2);
}

#[test]
fn unshielded_hazard_costs_a_life_and_resets_the_whole_run() {
    let (mut run, mut events) = scripted_run(vec![HAZARD, PLACE_RIGHT]);
    run.start_next_turn(&mut events).unwrap();
    run.state.streak = 3;
    run.state.uniques.extend([1, 4, 7]);
    run.state.scrambler_charges = 2;
    run.state.jammer_turns = 1;

    let result = run.flip(Side::Right, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::HazardHit {
            shield_saved: false,
            game_over: false,
            reason: None,
            turns_left: 39,
        }
    );
    assert_eq!(run.state.lives, 2);
    // Run-scoped fields clear together, never partially.
    assert_eq!(run.state.streak, 0);
    assert!(run.state.uniques.is_empty());
    assert!(!run.state.has_shield);
    assert_eq!(run.state.scrambler_charges, 0);
    assert_eq!(run.state.jammer_turns, 0);
}

#[test]
fn hazard_on_last_life_ends_the_game() {
    let (mut run, mut events) = scripted_run(vec![HAZARD, PLACE_LEFT]);
    run.start_next_turn(&mut events).unwrap();
    run.state.lives = 1;

    let result = run.flip(Side::Left, &mut events).unwrap();
    match result {
        TurnResult::HazardHit {
            shield_saved,
            game_over,
            reason,
            ..
        } => {
            assert!(!shield_saved);
            assert!(game_over);
            assert_eq!(reason, Some(GameOverReason::Lives));
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(run.state.phase, Phase::GameOver);
    // The idempotent guard keeps answering game-over without more mutation.
    assert!(matches!(
        run.start_next_turn(&mut events).unwrap(),
        TurnResult::GameOver {
            reason: GameOverReason::Lives,
            ..
        }
    ));
    let endings = events
        .drain()
        .filter(|event| matches!(event, lootflip_core::Event::GameEnded { .. }))
        .count();
    assert_eq!(endings, 1);
}

#[test]
fn duplicate_with_shield_is_saved_not_busted() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_JOKER, number(3)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.uniques.insert(3);
    run.state.has_shield = true;

    let result = run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::Treasure {
            loot: Loot::Number(3),
            duplicate_busted: false,
            shield_saved: true,
            game_over: false,
            turns_left: 39,
        }
    );
    assert!(!run.state.has_shield);
    assert_eq!(run.state.unique_count(), 1);
}

#[test]
fn scrambler_reroll_rescues_a_duplicate() {
    let (mut run, mut events) =
        scripted_run(vec![NO_HAZARD, NO_JOKER, number(3), number(5)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.uniques.insert(3);
    run.state.scrambler_charges = 1;

    let result = run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::Treasure {
            loot: Loot::Number(5),
            duplicate_busted: false,
            shield_saved: false,
            game_over: false,
            turns_left: 39,
        }
    );
    assert_eq!(run.state.scrambler_charges, 0);
    assert!(run.state.uniques.contains(&5));
    assert!(run.state.uniques.contains(&3));
}

#[test]
fn failed_reroll_busts_and_reports_the_original_draw() {
    let (mut run, mut events) =
        scripted_run(vec![NO_HAZARD, NO_JOKER, number(3), number(5)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.uniques.extend([3, 5]);
    run.state.scrambler_charges = 1;

    let result = run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(
        result,
        TurnResult::Treasure {
            loot: Loot::Number(3),
            duplicate_busted: true,
            shield_saved: false,
            game_over: false,
            turns_left: 39,
        }
    );
    assert!(run.state.uniques.is_empty());
    assert_eq!(run.state.scrambler_charges, 0);
}

#[test]
fn spare_shield_converts_into_one_charge() {
    let (mut run, mut events) =
        scripted_run(vec![NO_HAZARD, JOKER, joker(JokerKind::Shield)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.has_shield = true;

    let result = run.flip(Side::Left, &mut events).unwrap();
    assert!(matches!(
        result,
        TurnResult::Treasure {
            loot: Loot::Joker(JokerKind::Shield),
            duplicate_busted: false,
            shield_saved: false,
            ..
        }
    ));
    assert!(run.state.has_shield);
    assert_eq!(run.state.scrambler_charges, 1);
}

#[test]
fn scrambler_pickup_caps_at_four_charges() {
    let (mut run, mut events) =
        scripted_run(vec![NO_HAZARD, JOKER, joker(JokerKind::Scrambler)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.scrambler_charges = 3;

    run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(run.state.scrambler_charges, 4);
}

#[test]
fn jammer_pickup_overwrites_remaining_duration() {
    let (mut run, mut events) =
        scripted_run(vec![NO_HAZARD, JOKER, joker(JokerKind::Jammer)]);
    run.start_next_turn(&mut events).unwrap();
    run.state.jammer_turns = 1;

    run.flip(Side::Left, &mut events).unwrap();
    assert_eq!(run.state.jammer_turns, 3);
}

#[test]
fn jammer_ticks_down_at_turn_start_and_lowers_the_odds() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD]);
    run.state.jammer_turns = 2;
    run.start_next_turn(&mut events).unwrap();
    assert_eq!(run.state.jammer_turns, 1);

    let started = events
        .drain()
        .find_map(|event| match event {
            lootflip_core::Event::TurnStarted { hazard_chance, .. } => Some(hazard_chance),
            _ => None,
        })
        .unwrap();
    assert!((started - 0.05).abs() < 1e-9);
}

#[test]
fn banking_pays_the_table_and_resets_the_run() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_HAZARD]);
    run.start_next_turn(&mut events).unwrap();
    run.state.uniques.extend([1, 2, 3, 4]);
    run.state.streak = 4;
    assert!(run.can_bank());

    let result = run.bank(&mut events).unwrap();
    assert!(matches!(
        result,
        TurnResult::Banked {
            points: 40,
            total_score: 40,
            ..
        }
    ));
    assert_eq!(run.state.total_score, 40);
    assert!(run.state.uniques.is_empty());
    assert_eq!(run.state.streak, 0);
    // Banking costs no turn; the next transition deals a fresh pair.
    assert_eq!(run.state.turns_left, 40);
    assert_eq!(
        run.start_next_turn(&mut events).unwrap(),
        TurnResult::Ready
    );
}

#[test]
fn bank_is_rejected_without_a_live_turn_or_loot() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD]);
    assert!(!run.can_bank());
    assert!(matches!(
        run.bank(&mut events),
        Err(RunError::BankUnavailable)
    ));

    run.start_next_turn(&mut events).unwrap();
    // A live turn with nothing collected still cannot bank.
    assert!(!run.can_bank());
    assert!(matches!(
        run.bank(&mut events),
        Err(RunError::BankUnavailable)
    ));
}

#[test]
fn lives_exhaustion_outranks_turn_exhaustion() {
    let (mut run, mut events) = scripted_run(vec![]);
    run.state.lives = 0;
    run.state.turns_left = 0;
    assert!(matches!(
        run.start_next_turn(&mut events).unwrap(),
        TurnResult::GameOver {
            reason: GameOverReason::Lives,
            ..
        }
    ));
}

#[test]
fn spending_the_last_turn_ends_the_game() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_JOKER, number(2)]);
    run.state.turns_left = 1;
    run.start_next_turn(&mut events).unwrap();
    let result = run.flip(Side::Right, &mut events).unwrap();
    assert!(matches!(
        result,
        TurnResult::Treasure {
            game_over: true,
            turns_left: 0,
            ..
        }
    ));
    assert_eq!(run.state.phase, Phase::GameOver);
}

#[test]
fn transitions_outside_their_phase_are_rejected() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_JOKER, number(1)]);
    assert!(matches!(
        run.flip(Side::Left, &mut events),
        Err(RunError::InvalidPhase(Phase::Setup))
    ));

    run.start_next_turn(&mut events).unwrap();
    // Slots are fixed for the turn; dealing again mid-turn is not allowed.
    assert!(matches!(
        run.start_next_turn(&mut events),
        Err(RunError::InvalidPhase(Phase::AwaitingFlip))
    ));

    run.flip(Side::Left, &mut events).unwrap();
    assert!(matches!(
        run.flip(Side::Left, &mut events),
        Err(RunError::InvalidPhase(Phase::AwaitingNextTurn))
    ));
}

#[test]
fn banked_score_never_decreases_over_a_seeded_game() {
    let mut run = RunState::new(GameConfig::default(), 42);
    let mut events = EventBus::default();
    let mut last_score = 0;
    loop {
        match run.start_next_turn(&mut events).unwrap() {
            TurnResult::GameOver { .. } => break,
            TurnResult::Ready => {}
            other => panic!("unexpected result {other:?}"),
        }
        if run.can_bank() && run.state.unique_count() >= 3 {
            run.bank(&mut events).unwrap();
            assert!(run.state.total_score >= last_score);
            last_score = run.state.total_score;
            continue;
        }
        run.flip(Side::Right, &mut events).unwrap();
        assert!(run.state.total_score >= last_score);
        last_score = run.state.total_score;
        if run.state.phase == Phase::GameOver {
            break;
        }
    }
}

#[test]
fn restart_replaces_the_session_wholesale() {
    let (mut run, mut events) = scripted_run(vec![NO_HAZARD, NO_JOKER, number(6)]);
    run.start_next_turn(&mut events).unwrap();
    run.flip(Side::Left, &mut events).unwrap();
    run.state.total_score = 77;

    run.restart();
    assert_eq!(run.state.total_score, 0);
    assert_eq!(run.state.turns_left, 40);
    assert_eq!(run.state.lives, 3);
    assert_eq!(run.state.phase, Phase::Setup);
    assert!(run.state.uniques.is_empty());
}
