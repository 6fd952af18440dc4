//! The session: stages in sequence, then the optional infinite mode.

use super::types::{SessionEnd, StageOutcome, StageState};
use crate::core::{Result, Rules};
use crate::events::GameEvent;
use crate::items::Inventory;
use crate::magazine::ShellMagazine;
use crate::round::{RoundController, RoundEnd, TurnState};
use crate::save_manager::{SaveStore, Snapshot};
use crate::table::{Seat, Table};
use crate::ui::Presenter;
use rand::Rng;

/// Owns the whole game: table, stage progress, rules and the outside world.
pub struct Session<P: Presenter, S: SaveStore, R: Rng> {
    table: Table,
    turn: TurnState,
    state: StageState,
    rules: Rules,
    presenter: P,
    store: S,
    rng: R,
}

impl<P: Presenter, S: SaveStore, R: Rng> Session<P, S, R> {
    pub fn new(rules: Rules, presenter: P, store: S, rng: R) -> Self {
        Self {
            table: Table::new(&rules),
            turn: TurnState::new(),
            state: StageState::new(),
            rules,
            presenter,
            store,
            rng,
        }
    }

    /// Continue from the store's snapshot, if it has one.
    pub fn resume(&mut self) -> Result<bool> {
        match self.store.load()? {
            Some(snapshot) => {
                self.restore(&snapshot);
                tracing::info!(stage = self.state.stage, infinite = self.state.infinite_mode, "progress loaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        let capacity = self.rules.inventory_capacity;
        self.table.player.lives = snapshot.player_lives;
        self.table.opponent.lives = snapshot.opponent_lives;
        self.table.player.items = Inventory::from_items(snapshot.player_items.clone(), capacity);
        self.table.opponent.items = Inventory::from_items(snapshot.opponent_items.clone(), capacity);
        self.state = StageState {
            stage: snapshot.stage.clamp(1, crate::core::STAGE_COUNT),
            round: snapshot.round,
            infinite_mode: snapshot.infinite_mode,
            winnings: snapshot.winnings,
            stages_completed: snapshot.stages_completed,
        };
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_lives: self.table.player.lives,
            opponent_lives: self.table.opponent.lives,
            player_items: self.table.player.items.items().to_vec(),
            opponent_items: self.table.opponent.items.items().to_vec(),
            stage: self.state.stage,
            round: self.state.round,
            infinite_mode: self.state.infinite_mode,
            winnings: self.state.winnings,
            stages_completed: self.state.stages_completed,
        }
    }

    /// Play until the session ends one way or another.
    pub fn run(&mut self) -> Result<SessionEnd> {
        let end = if self.state.infinite_mode {
            self.run_infinite()?
        } else {
            self.run_sequential()?
        };
        tracing::info!(?end, "session over");
        self.presenter.narrate(&GameEvent::SessionEnded(end));
        Ok(end)
    }

    fn run_sequential(&mut self) -> Result<SessionEnd> {
        loop {
            let outcome = self.play_stage()?;
            if let Some(end) = self.settle_sequential_stage(outcome)? {
                return Ok(end);
            }
            if self.state.infinite_mode {
                return self.run_infinite();
            }
        }
    }

    /// Apply one sequential stage result. `Some` ends the session.
    ///
    /// A win on the last stage offers infinite mode; accepting it switches
    /// the session over and returns `None`.
    pub fn settle_sequential_stage(&mut self, outcome: StageOutcome) -> Result<Option<SessionEnd>> {
        let stage = self.state.stage;
        match outcome {
            StageOutcome::Win if !self.state.is_final_stage() => {
                self.state.stages_completed += 1;
                self.state.stage = self.state.next_stage();
                self.save();
                Ok(None)
            }
            StageOutcome::Win => {
                self.state.stages_completed += 1;
                self.save();
                if !self.ask(|p| p.confirm_infinite_mode())? {
                    return Ok(Some(SessionEnd::Champion));
                }
                self.enter_infinite_mode();
                self.save();
                Ok(None)
            }
            StageOutcome::Loss => {
                self.save();
                Ok(Some(SessionEnd::Defeated { stage }))
            }
            StageOutcome::Draw => {
                self.save();
                Ok(Some(SessionEnd::Stalemate { stage }))
            }
        }
    }

    fn run_infinite(&mut self) -> Result<SessionEnd> {
        loop {
            let outcome = self.play_stage()?;
            if let Some(end) = self.settle_infinite_stage(outcome)? {
                return Ok(end);
            }
            self.save();
        }
    }

    fn enter_infinite_mode(&mut self) {
        self.state.infinite_mode = true;
        self.state.winnings = self.rules.infinite_seed_winnings;
        self.state.stages_completed = 0;
        self.state.stage = 1;
        tracing::info!(winnings = self.state.winnings, "infinite mode");
        self.presenter.narrate(&GameEvent::InfiniteModeEntered {
            winnings: self.state.winnings,
        });
    }

    /// Apply one infinite-mode stage result. `Some` ends the session.
    pub fn settle_infinite_stage(&mut self, outcome: StageOutcome) -> Result<Option<SessionEnd>> {
        if outcome != StageOutcome::Win {
            let forfeited = std::mem::take(&mut self.state.winnings);
            return Ok(Some(SessionEnd::Bust { forfeited }));
        }

        self.state.stages_completed += 1;
        let interval = self.rules.wager_interval;
        if interval > 0 && self.state.stages_completed % interval == 0 {
            let winnings = self.state.winnings;
            if !self.ask(|p| p.confirm_double_or_quit(winnings))? {
                return Ok(Some(SessionEnd::CashedOut { winnings }));
            }
            self.state.winnings = winnings.saturating_mul(2);
            self.presenter.narrate(&GameEvent::WinningsDoubled {
                winnings: self.state.winnings,
            });
        }

        self.state.stage = self.state.next_stage();
        Ok(None)
    }

    /// Reset lives for the current stage. Inventories only clear on stage 1.
    pub fn enter_stage(&mut self) {
        let stage = self.state.stage;
        let lives = self.rules.lives_for_stage(stage);
        for seat in [Seat::Player, Seat::Opponent] {
            let contestant = self.table.contestant_mut(seat);
            contestant.lives = lives;
            if stage == 1 {
                contestant.items.clear();
            }
        }
        self.table.magazine = ShellMagazine::new();
        self.state.round = 0;
        self.turn = TurnState::new();

        tracing::info!(stage, lives, infinite = self.state.infinite_mode, "stage start");
        self.presenter.narrate(&GameEvent::StageStarted {
            stage,
            lives,
            infinite_mode: self.state.infinite_mode,
        });
    }

    /// Enter the current stage and play rounds until it is decided or capped.
    pub fn play_stage(&mut self) -> Result<StageOutcome> {
        self.enter_stage();

        let outcome = loop {
            if self.state.round >= self.rules.max_rounds_per_stage {
                tracing::warn!(stage = self.state.stage, rounds = self.state.round, "round cap reached");
                break StageOutcome::Draw;
            }
            self.state.round += 1;

            let end = RoundController {
                table: &mut self.table,
                turn: &mut self.turn,
                rules: &self.rules,
                presenter: &mut self.presenter,
                rng: &mut self.rng,
                stage: self.state.stage,
                round: self.state.round,
            }
            .play()?;

            match end {
                RoundEnd::Decided { loser: Seat::Opponent } => break StageOutcome::Win,
                RoundEnd::Decided { loser: Seat::Player } => break StageOutcome::Loss,
                RoundEnd::MagazineSpent => {}
            }
        };

        tracing::info!(stage = self.state.stage, ?outcome, rounds = self.state.round, "stage over");
        self.presenter.narrate(&GameEvent::StageFinished {
            stage: self.state.stage,
            outcome,
        });
        Ok(outcome)
    }

    /// Write a snapshot. Failure is reported and play goes on.
    fn save(&mut self) {
        let snapshot = self.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => self.presenter.narrate(&GameEvent::GameSaved),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.presenter.narrate(&GameEvent::SaveFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn ask(&mut self, mut question: impl FnMut(&mut P) -> Result<bool>) -> Result<bool> {
        loop {
            match question(&mut self.presenter) {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_rejected_input() => self.presenter.narrate(&GameEvent::InputRejected {
                    reason: e.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StageState {
        &mut self.state
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;
    use crate::save_manager::MemoryStore;
    use crate::ui::testing::ScriptedPresenter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(presenter: ScriptedPresenter) -> Session<ScriptedPresenter, MemoryStore, StdRng> {
        Session::new(
            Rules::default(),
            presenter,
            MemoryStore::new(),
            StdRng::seed_from_u64(99),
        )
    }

    #[test]
    fn test_stage_lives_and_inventory_reset() {
        let mut s = session(ScriptedPresenter::new());
        s.table_mut().player.items.add(ItemKind::Saw).unwrap();
        s.table_mut().opponent.items.add(ItemKind::Phone).unwrap();

        s.state_mut().stage = 2;
        s.enter_stage();
        assert_eq!(s.table().player.lives, 4);
        assert_eq!(s.table().opponent.lives, 4);
        assert_eq!(s.table().player.items.len(), 1);

        s.state_mut().stage = 3;
        s.enter_stage();
        assert_eq!(s.table().player.lives, 6);
        assert_eq!(s.table().opponent.items.len(), 1);

        s.state_mut().stage = 1;
        s.enter_stage();
        assert_eq!(s.table().player.lives, 2);
        assert!(s.table().player.items.is_empty());
        assert!(s.table().opponent.items.is_empty());
        assert_eq!(s.state().round, 0);
    }

    #[test]
    fn test_stage_three_win_enters_infinite_mode() {
        let mut s = session(ScriptedPresenter::new().confirms(vec![true]));
        *s.state_mut() = StageState {
            stage: 3,
            round: 7,
            infinite_mode: false,
            winnings: 0,
            stages_completed: 2,
        };

        assert_eq!(s.settle_sequential_stage(StageOutcome::Win).unwrap(), None);
        assert!(s.state().infinite_mode);
        assert_eq!(s.state().winnings, 1000);
        assert_eq!(s.state().stage, 1);
        assert_eq!(s.state().stages_completed, 0);
        assert!(s
            .presenter()
            .events()
            .contains(&GameEvent::InfiniteModeEntered { winnings: 1000 }));
        // Once for the cleared stage, once for the switch.
        assert_eq!(s.store().saves(), 2);
        assert_eq!(s.store().latest().map(|snap| snap.infinite_mode), Some(true));
    }

    #[test]
    fn test_stage_three_win_declined_is_champion() {
        let mut s = session(ScriptedPresenter::new().confirms(vec![false]));
        s.state_mut().stage = 3;

        let end = s.settle_sequential_stage(StageOutcome::Win).unwrap();
        assert_eq!(end, Some(SessionEnd::Champion));
        assert!(!s.state().infinite_mode);
        assert_eq!(s.state().winnings, 0);
    }

    #[test]
    fn test_early_win_advances_the_stage() {
        let mut s = session(ScriptedPresenter::new());
        assert_eq!(s.settle_sequential_stage(StageOutcome::Win).unwrap(), None);
        assert_eq!(s.state().stage, 2);
        assert_eq!(s.state().stages_completed, 1);
        assert_eq!(s.store().latest().map(|snap| snap.stage), Some(2));
    }

    #[test]
    fn test_wager_accepted_on_third_completion() {
        let mut s = session(ScriptedPresenter::new().confirms(vec![true]));
        *s.state_mut() = StageState {
            stage: 2,
            round: 4,
            infinite_mode: true,
            winnings: 1000,
            stages_completed: 2,
        };

        let end = s.settle_infinite_stage(StageOutcome::Win).unwrap();
        assert_eq!(end, None);
        assert_eq!(s.state().stages_completed, 3);
        assert_eq!(s.state().winnings, 2000);
        assert_eq!(s.state().stage, 3);
        assert!(s
            .presenter()
            .events()
            .contains(&GameEvent::WinningsDoubled { winnings: 2000 }));
    }

    #[test]
    fn test_wager_declined_cashes_out() {
        let mut s = session(ScriptedPresenter::new().confirms(vec![false]));
        s.state_mut().infinite_mode = true;
        s.state_mut().winnings = 1000;
        s.state_mut().stages_completed = 2;

        let end = s.settle_infinite_stage(StageOutcome::Win).unwrap();
        assert_eq!(end, Some(SessionEnd::CashedOut { winnings: 1000 }));
        assert_eq!(s.state().winnings, 1000);
    }

    #[test]
    fn test_no_wager_between_intervals() {
        let mut s = session(ScriptedPresenter::new());
        s.state_mut().infinite_mode = true;
        s.state_mut().winnings = 1000;
        s.state_mut().stage = 3;

        assert_eq!(s.settle_infinite_stage(StageOutcome::Win).unwrap(), None);
        assert_eq!(s.state().stages_completed, 1);
        assert_eq!(s.state().winnings, 1000);
        assert_eq!(s.state().stage, 1);
    }

    #[test]
    fn test_infinite_loss_forfeits_everything() {
        let mut s = session(ScriptedPresenter::new());
        s.state_mut().infinite_mode = true;
        s.state_mut().winnings = 8000;

        let end = s.settle_infinite_stage(StageOutcome::Draw).unwrap();
        assert_eq!(end, Some(SessionEnd::Bust { forfeited: 8000 }));
        assert_eq!(s.state().winnings, 0);
    }

    #[test]
    fn test_play_stage_reaches_an_outcome() {
        let mut s = session(ScriptedPresenter::new().always_fire_at(Seat::Opponent));
        let outcome = s.play_stage().unwrap();
        let stage_events: Vec<_> = s
            .presenter()
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::StageFinished { .. }))
            .collect();
        assert_eq!(stage_events.len(), 1);
        match outcome {
            StageOutcome::Win => assert!(s.table().opponent.is_down()),
            StageOutcome::Loss => assert!(s.table().player.is_down()),
            StageOutcome::Draw => panic!("stage 1 should not hit the round cap"),
        }
    }

    #[test]
    fn test_round_cap_draws() {
        let rules = Rules {
            max_rounds_per_stage: 0,
            ..Rules::default()
        };
        let mut s = Session::new(
            rules,
            ScriptedPresenter::new(),
            MemoryStore::new(),
            StdRng::seed_from_u64(1),
        );
        assert_eq!(s.play_stage().unwrap(), StageOutcome::Draw);
    }

    #[test]
    fn test_save_failure_is_narrated_not_fatal() {
        let rules = Rules {
            max_rounds_per_stage: 0,
            ..Rules::default()
        };
        let mut s = Session::new(
            rules,
            ScriptedPresenter::new(),
            MemoryStore::failing(),
            StdRng::seed_from_u64(1),
        );
        let end = s.run().unwrap();
        assert_eq!(end, SessionEnd::Stalemate { stage: 1 });
        assert!(s
            .presenter()
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::SaveFailed { .. })));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut s = session(ScriptedPresenter::new());
        let snapshot = Snapshot {
            player_lives: 3,
            opponent_lives: 1,
            player_items: vec![ItemKind::Magnifier],
            opponent_items: vec![],
            stage: 2,
            round: 5,
            infinite_mode: true,
            winnings: 2000,
            stages_completed: 4,
        };
        s.restore(&snapshot);
        assert_eq!(s.snapshot(), snapshot);
    }

    #[test]
    fn test_resume_from_store() {
        let mut s = session(ScriptedPresenter::new());
        assert!(!s.resume().unwrap());

        s.state_mut().stage = 3;
        let snapshot = s.snapshot();
        let mut store = MemoryStore::new();
        store.save(&snapshot).unwrap();

        let mut resumed = Session::new(
            Rules::default(),
            ScriptedPresenter::new(),
            store,
            StdRng::seed_from_u64(2),
        );
        assert!(resumed.resume().unwrap());
        assert_eq!(resumed.state().stage, 3);
    }
}
