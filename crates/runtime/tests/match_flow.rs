//! End-to-end match flow through the runtime: submissions, resolution,
//! timeouts, forfeits, persistence, and AI-driven simulation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arena_content::ContentFactory;
use arena_core::{
    ArenaConfig, ArenaEnv, CharacterDef, CharacterId, CombatantId, DamageNature, DamageSpec,
    EffectEntryKind, EffectKind, EnergyColor, Lineage, MatchAction, MatchState, Phase, RngOracle,
    Roster, Skill, SkillReach, TeamSide, TeamSpec, WaveCategory, Winner, initialize, resolve_turn,
};
use arena_runtime::{
    ArenaRuntime, FileMatchRepo, InMemoryMatchRepo, MatchEvent, MatchRepository,
    RandomActionProvider, RepositoryError, RuntimeConfig, RuntimeError, Submission,
    SubmissionError, SubmitOutcome, TurnRecord,
};

/// Every draw returns zero: all-Iron teams are granted only Red.
struct Zero;

impl RngOracle for Zero {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

fn a(slot: u8) -> CombatantId {
    CombatantId::new(TeamSide::A, slot)
}

fn b(slot: u8) -> CombatantId {
    CombatantId::new(TeamSide::B, slot)
}

fn roster() -> Roster {
    ["iron_1", "iron_2", "iron_3"]
        .into_iter()
        .map(|id| CharacterDef {
            id: CharacterId::new(id),
            name: id.replace('_', " "),
            lineage: Lineage::Iron,
            roles: Vec::new(),
            base_hp: 40,
            is_starter: true,
            passive: None,
            skills: vec![
                Skill::new("jab", "Jab", WaveCategory::Act, DamageNature::Knt)
                    .with_cost(EnergyColor::Red, 1)
                    .with_reach(SkillReach::Single)
                    .with_effect(EffectKind::Damage(DamageSpec::flat(15))),
            ],
        })
        .collect()
}

fn lineup(player: &str) -> TeamSpec {
    TeamSpec::new(player, ["iron_1", "iron_2", "iron_3"])
}

async fn start(config: RuntimeConfig) -> ArenaRuntime {
    ArenaRuntime::builder()
        .config(config)
        .roster(roster())
        .teams(lineup("alice"), lineup("bob"))
        .rng(Zero)
        .build()
        .await
        .expect("runtime should start")
}

#[tokio::test]
async fn turn_resolves_once_both_sides_submit() {
    let runtime = start(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut events = handle.subscribe();

    let opening = handle.state().await.unwrap();
    assert_eq!(opening.turn, 1);
    assert_eq!(opening.phase, Phase::Planning);
    assert_eq!(opening.player_a.team[0].energy.red, 3);

    let jab = Submission::new(vec![MatchAction::new(a(0), "jab", b(0))]);
    assert_eq!(
        handle.submit(TeamSide::A, jab).await.unwrap(),
        SubmitOutcome::Waiting
    );
    assert_eq!(handle.state().await.unwrap().turn, 1);

    assert_eq!(
        handle.submit(TeamSide::B, Submission::pass()).await.unwrap(),
        SubmitOutcome::Resolved {
            turn: 1,
            winner: None
        }
    );

    let state = handle.state().await.unwrap();
    assert_eq!(state.turn, 2);
    assert_eq!(state.phase, Phase::Planning);
    assert_eq!(state.player_b.team[0].hp, 25);

    assert_eq!(
        events.recv().await.unwrap(),
        MatchEvent::SubmissionAccepted {
            side: TeamSide::A,
            turn: 1
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        MatchEvent::SubmissionAccepted {
            side: TeamSide::B,
            turn: 1
        }
    );
    match events.recv().await.unwrap() {
        MatchEvent::TurnResolved { turn, log, state } => {
            assert_eq!(turn, 1);
            assert_eq!(state.turn, 2);
            let jab = log
                .iter()
                .find(|entry| entry.skill_name == "Jab")
                .expect("jab logged");
            assert_eq!(jab.caster, a(0));
            assert_eq!(jab.result.effects[0].kind, EffectEntryKind::Damage);
            assert_eq!(jab.result.effects[0].value, Some(15));
        }
        other => panic!("expected TurnResolved, got {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_submissions_keep_the_turn_open() {
    let runtime = start(RuntimeConfig::default()).await;
    let handle = runtime.handle();

    let foreign = Submission::new(vec![MatchAction::new(b(0), "jab", a(0))]);
    let err = handle.submit(TeamSide::A, foreign).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Submission(SubmissionError::ForeignCaster { .. })
    ));

    let greedy = Submission::new(vec![
        MatchAction::new(a(0), "jab", b(0)),
        MatchAction::new(a(1), "jab", b(0)),
        MatchAction::new(a(2), "jab", b(0)),
        MatchAction::new(a(2), "jab", b(1)),
    ]);
    let err = handle.submit(TeamSide::A, greedy).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Submission(SubmissionError::DuplicateCaster { caster }) if caster == a(2)
    ));

    handle
        .submit(TeamSide::A, Submission::pass())
        .await
        .unwrap();
    let err = handle
        .submit(TeamSide::A, Submission::pass())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Submission(SubmissionError::AlreadySubmitted {
            side: TeamSide::A,
            turn: 1
        })
    ));

    assert_eq!(handle.state().await.unwrap().turn, 1);
}

#[tokio::test]
async fn timeout_passes_for_the_silent_side() {
    let runtime = start(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut events = handle.subscribe();

    handle
        .submit(TeamSide::B, Submission::pass())
        .await
        .unwrap();
    let outcome = handle.timeout(TeamSide::A).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Resolved { turn: 1, .. }));

    let mut saw_timeout = false;
    while let Ok(event) = events.try_recv() {
        if event == (MatchEvent::TimedOut { side: TeamSide::A, turn: 1 }) {
            saw_timeout = true;
        }
    }
    assert!(saw_timeout);
    assert_eq!(handle.state().await.unwrap().turn, 2);
}

#[tokio::test]
async fn forfeit_hands_the_match_to_the_opponent() {
    let runtime = start(RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut events = handle.subscribe();

    handle.forfeit(TeamSide::A).await.unwrap();

    let state = handle.state().await.unwrap();
    assert_eq!(state.phase, Phase::Finished);
    assert_eq!(state.winner, Some(Winner::Side(TeamSide::B)));
    assert_eq!(
        events.recv().await.unwrap(),
        MatchEvent::MatchFinished {
            winner: Winner::Side(TeamSide::B),
            turn: 1,
            forfeited_by: Some(TeamSide::A)
        }
    );

    let err = handle
        .submit(TeamSide::B, Submission::pass())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Submission(SubmissionError::MatchFinished)
    ));
    assert!(handle.forfeit(TeamSide::B).await.is_err());
}

#[tokio::test]
async fn repository_receives_every_turn() {
    let repo = Arc::new(InMemoryMatchRepo::new());
    let runtime = ArenaRuntime::builder()
        .config(RuntimeConfig {
            match_id: "duel".into(),
            ..RuntimeConfig::default()
        })
        .roster(roster())
        .teams(lineup("alice"), lineup("bob"))
        .rng(Zero)
        .repository(repo.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert_eq!(repo.load_state("duel").unwrap().unwrap().turn, 1);

    for _ in 0..2 {
        handle
            .submit(TeamSide::A, Submission::pass())
            .await
            .unwrap();
        handle
            .submit(TeamSide::B, Submission::pass())
            .await
            .unwrap();
    }

    let saved = repo.load_state("duel").unwrap().unwrap();
    assert_eq!(saved, handle.state().await.unwrap());
    assert_eq!(saved.turn, 3);
    let turns: Vec<u32> = repo
        .load_turns("duel")
        .unwrap()
        .iter()
        .map(|r| r.turn)
        .collect();
    assert_eq!(turns, [1, 2]);
}

/// In-memory repository whose turn log refuses appends while `refusing` is set.
struct RefusingTurnLog {
    inner: InMemoryMatchRepo,
    refusing: AtomicBool,
}

impl RefusingTurnLog {
    fn new() -> Self {
        Self {
            inner: InMemoryMatchRepo::new(),
            refusing: AtomicBool::new(true),
        }
    }
}

impl MatchRepository for RefusingTurnLog {
    fn save_state(&self, match_id: &str, state: &MatchState) -> Result<(), RepositoryError> {
        self.inner.save_state(match_id, state)
    }

    fn load_state(&self, match_id: &str) -> Result<Option<MatchState>, RepositoryError> {
        self.inner.load_state(match_id)
    }

    fn append_turn(&self, match_id: &str, record: &TurnRecord) -> Result<(), RepositoryError> {
        if self.refusing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Io(std::io::Error::other("turn log offline")));
        }
        self.inner.append_turn(match_id, record)
    }

    fn load_turns(&self, match_id: &str) -> Result<Vec<TurnRecord>, RepositoryError> {
        self.inner.load_turns(match_id)
    }

    fn exists(&self, match_id: &str) -> bool {
        self.inner.exists(match_id)
    }

    fn delete(&self, match_id: &str) -> Result<(), RepositoryError> {
        self.inner.delete(match_id)
    }
}

#[tokio::test]
async fn refused_turn_log_leaves_the_turn_open() {
    let repo = Arc::new(RefusingTurnLog::new());
    let runtime = ArenaRuntime::builder()
        .config(RuntimeConfig {
            match_id: "flaky".into(),
            ..RuntimeConfig::default()
        })
        .roster(roster())
        .teams(lineup("alice"), lineup("bob"))
        .rng(Zero)
        .repository(repo.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let jab = || Submission::new(vec![MatchAction::new(a(0), "jab", b(0))]);

    assert_eq!(
        handle.submit(TeamSide::A, jab()).await.unwrap(),
        SubmitOutcome::Waiting
    );
    let err = handle
        .submit(TeamSide::B, Submission::pass())
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Repository(RepositoryError::Io(_))));

    // Live and stored state both stay on the unresolved turn.
    let live = handle.state().await.unwrap();
    assert_eq!(live.turn, 1);
    assert_eq!(live.phase, Phase::Planning);
    assert_eq!(live.player_b.team[0].hp, 40);
    assert_eq!(repo.load_state("flaky").unwrap(), Some(live));
    assert!(repo.load_turns("flaky").unwrap().is_empty());

    // Both submissions were dropped, so the turn takes fresh ones.
    repo.refusing.store(false, Ordering::SeqCst);
    assert_eq!(
        handle.submit(TeamSide::A, jab()).await.unwrap(),
        SubmitOutcome::Waiting
    );
    assert_eq!(
        handle.submit(TeamSide::B, Submission::pass()).await.unwrap(),
        SubmitOutcome::Resolved {
            turn: 1,
            winner: None
        }
    );

    let stored = repo.load_state("flaky").unwrap().unwrap();
    assert_eq!(stored, handle.state().await.unwrap());
    assert_eq!(stored.turn, 2);
    assert_eq!(stored.player_b.team[0].hp, 25);
    let turns: Vec<u32> = repo
        .load_turns("flaky")
        .unwrap()
        .iter()
        .map(|r| r.turn)
        .collect();
    assert_eq!(turns, [1]);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[test]
fn file_commit_keeps_the_prior_state_when_the_log_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileMatchRepo::new(dir.path()).unwrap();
    let roster = roster();
    let config = ArenaConfig::default();
    let env = ArenaEnv::new(&roster, &Zero, &config);
    let opening = initialize(&env, 5, &lineup("alice"), &lineup("bob")).unwrap();
    repo.save_state("stuck", &opening).unwrap();

    // A directory squatting on the turn log path makes every append fail.
    let log_path = dir.path().join("stuck").join("turns.jsonl");
    std::fs::create_dir(&log_path).unwrap();

    let outcome = resolve_turn(&opening, &[MatchAction::new(a(0), "jab", b(0))], &[], &env);
    let record = TurnRecord {
        turn: 1,
        log: outcome.log.clone(),
    };
    assert!(repo.commit_turn("stuck", &outcome.state, &record).is_err());
    assert_eq!(repo.load_state("stuck").unwrap(), Some(opening));
    assert!(!dir.path().join("stuck").join("state.json.tmp").exists());

    std::fs::remove_dir(&log_path).unwrap();
    repo.commit_turn("stuck", &outcome.state, &record).unwrap();
    assert_eq!(repo.load_state("stuck").unwrap(), Some(outcome.state));
    assert_eq!(repo.load_turns("stuck").unwrap(), vec![record]);
}

#[tokio::test]
async fn file_repository_resumes_a_match() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig {
        match_id: "ranked-7".into(),
        seed: 99,
        persistence_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    };

    let runtime = start(config.clone()).await;
    let handle = runtime.handle();
    handle
        .submit(
            TeamSide::A,
            Submission::new(vec![MatchAction::new(a(0), "jab", b(1))]),
        )
        .await
        .unwrap();
    handle
        .submit(TeamSide::B, Submission::pass())
        .await
        .unwrap();
    let before = handle.state().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let resumed = ArenaRuntime::builder()
        .config(config)
        .roster(roster())
        .rng(Zero)
        .resume()
        .build()
        .await
        .unwrap();
    let after = resumed.handle().state().await.unwrap();
    assert_eq!(after, before);
    assert_eq!(after.player_b.team[1].hp, 25);

    let repo = FileMatchRepo::new(dir.path()).unwrap();
    assert_eq!(repo.list_matches().unwrap(), ["ranked-7"]);
    assert_eq!(repo.load_turns("ranked-7").unwrap().len(), 1);
}

#[tokio::test]
async fn tampered_state_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig {
        match_id: "audit".into(),
        persistence_dir: Some(dir.path().to_path_buf()),
        ..RuntimeConfig::default()
    };
    let runtime = start(config).await;
    drop(runtime);

    let path = dir.path().join("audit").join("state.json");
    let original = std::fs::read_to_string(&path).unwrap();
    let tampered = original.replacen("\"hp\": 40", "\"hp\": 39", 1);
    assert_ne!(original, tampered);
    std::fs::write(&path, tampered).unwrap();

    let repo = FileMatchRepo::new(dir.path()).unwrap();
    assert!(matches!(
        repo.load_state("audit"),
        Err(RepositoryError::CorruptedData(_))
    ));
    assert!(matches!(
        repo.load_state("../escape"),
        Err(RepositoryError::InvalidMatchId(_))
    ));
}

#[tokio::test]
async fn random_providers_replay_identically() {
    let factory = ContentFactory::bundled();
    let roster = factory.load_roster().unwrap();
    let arena = factory.load_config().unwrap();

    let mut finals = Vec::new();
    for _ in 0..2 {
        let mut runtime = ArenaRuntime::builder()
            .config(RuntimeConfig {
                arena: arena.clone(),
                seed: 2024,
                ..RuntimeConfig::default()
            })
            .roster(roster.clone())
            .teams(
                TeamSpec::new("iron", ["forge_warden", "scrap_reaper", "iron_chaplain"]),
                TeamSpec::new("void", ["hollow_seer", "rot_weaver", "null_warden"]),
            )
            .provider(TeamSide::A, RandomActionProvider::new(1))
            .provider(TeamSide::B, RandomActionProvider::new(2))
            .build()
            .await
            .unwrap();

        let state = runtime.run(40).await.expect("AI plans always validate");
        for combatant in state.combatants() {
            assert!(combatant.hp <= combatant.max_hp);
        }
        finals.push(state);
    }

    assert_eq!(finals[0], finals[1]);
    assert!(finals[0].turn > 1);
}
