//! One player's view over a shared game record.
//!
//! Each player runs their own [`Game`] against the same [`RecordStore`]. A player only ever
//! writes their own setup and the blob of the board they are shooting at; the other player
//! picks up those changes through [`Game::refresh`] and reconciles them into their own
//! board.
use std::mem;

use tracing::{debug, error, info, warn};

use crate::{
    board::{Board, BoardChange, Coordinate, ShotOutcome},
    objects::{AnimalType, ObjectKind, Photo},
    store::RecordStore,
};

pub use self::{
    errors::GameError,
    events::{GameEvent, Side},
    record::GameRecord,
    status::{SetupStatus, Slot, Status},
};

mod errors;
mod events;
mod record;
mod status;

/// Outcome of a completed turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TurnOutcome {
    /// Nothing was photographed.
    Miss(Coordinate),
    /// The given animal was photographed but still has unshot segments.
    Hit(AnimalType, Coordinate),
    /// The given animal was fully photographed but the opponent has others left.
    FullyShot(AnimalType, Coordinate),
    /// The given animal was fully photographed and it was the opponent's last.
    Victory(AnimalType, Coordinate),
}

/// State of a view that is rebuilt from the record or changed by play. Snapshotted so a
/// failed operation can be undone.
#[derive(Debug, Clone)]
struct View {
    board: Board,
    opp_board: Board,
    setup_status: SetupStatus,
    status: Status,
    your_turn: bool,
    winner: Option<String>,
    /// Blob of our own board as of the last reconciliation.
    last_board_blob: Option<String>,
}

/// One player's view of a game.
pub struct Game<S: RecordStore> {
    /// Where the shared record lives.
    store: S,

    /// Name of this player.
    me: String,

    /// Name of the other player.
    opponent: String,

    /// Seat of this player.
    slot: Slot,

    view: View,

    /// Notifications not yet drained.
    events: Vec<GameEvent>,
}

impl<S: RecordStore> Game<S> {
    /// Open the view of player `me` over the record in `store`.
    pub fn new(store: S, me: impl Into<String>) -> Result<Self, GameError> {
        let me = me.into();
        let record = store.load()?;
        let slot = record.slot_of(&me).ok_or_else(|| GameError::NotAPlayer(me.clone()))?;
        let opponent = record.player(slot.other()).to_owned();
        let view = View {
            board: Board::from_blob(record.board(slot))?,
            opp_board: Board::from_blob(record.board(slot.other()))?,
            setup_status: SetupStatus::derive(record.setup_done(), slot),
            status: record.status,
            your_turn: record.turn.as_deref() == Some(me.as_str()),
            winner: record.winner.clone(),
            last_board_blob: record.board(slot).map(str::to_owned),
        };
        debug!("opened game as {} ({}) against {}", me, slot, opponent);
        Ok(Self {
            store,
            me,
            opponent,
            slot,
            view,
            events: Vec::new(),
        })
    }

    /// Name of this player.
    pub fn me(&self) -> &str {
        &self.me
    }

    /// Name of the other player.
    pub fn opponent(&self) -> &str {
        &self.opponent
    }

    /// Seat of this player.
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// This player's own board.
    pub fn board(&self) -> &Board {
        &self.view.board
    }

    /// This player's view of the opponent's board.
    pub fn opp_board(&self) -> &Board {
        &self.view.opp_board
    }

    pub fn setup_status(&self) -> SetupStatus {
        self.view.setup_status
    }

    pub fn status(&self) -> Status {
        self.view.status
    }

    pub fn your_turn(&self) -> bool {
        self.view.your_turn
    }

    /// Name of the winner, once there is one.
    pub fn winner(&self) -> Option<&str> {
        self.view.winner.as_deref()
    }

    /// The store backing this view.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take every notification queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Run `op`, restoring the view and dropping its notifications if it fails.
    fn transaction<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let snapshot = self.view.clone();
        let queued = self.events.len();
        let result = op(self);
        if let Err(err) = &result {
            warn!("{} rolled back: {}", self.me, err);
            self.view = snapshot;
            self.events.truncate(queued);
        }
        result
    }

    fn require_status(&self, expected: Status) -> Result<(), GameError> {
        if self.view.status == expected {
            Ok(())
        } else {
            Err(GameError::WrongStatus {
                expected,
                actual: self.view.status,
            })
        }
    }

    fn require_turn(&self) -> Result<(), GameError> {
        self.require_status(Status::Active)?;
        if self.view.your_turn {
            Ok(())
        } else {
            Err(GameError::NotYourTurn)
        }
    }

    /// Check the freshly loaded `record` still has this player to move in an active game.
    fn require_record_turn(&self, record: &GameRecord) -> Result<(), GameError> {
        if record.status != Status::Active {
            return Err(GameError::WrongStatus {
                expected: Status::Active,
                actual: record.status,
            });
        }
        if record.turn.as_deref() != Some(self.me.as_str()) {
            warn!("{} holds a stale turn, record says {:?}", self.me, record.turn);
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    fn set_setup_status(&mut self, setup_status: SetupStatus) {
        if self.view.setup_status != setup_status {
            self.view.setup_status = setup_status;
            self.events.push(GameEvent::SetupStatusChanged(setup_status));
        }
    }

    fn set_status(&mut self, status: Status) {
        if self.view.status != status {
            self.view.status = status;
            self.events.push(GameEvent::StatusChanged(status));
        }
    }

    fn set_your_turn(&mut self, your_turn: bool) {
        if self.view.your_turn != your_turn {
            self.view.your_turn = your_turn;
            self.events.push(GameEvent::TurnChanged { your_turn });
        }
    }

    fn set_winner(&mut self, winner: Option<String>) {
        if self.view.winner != winner {
            if let Some(winner) = &winner {
                self.events.push(GameEvent::Won {
                    winner: winner.clone(),
                });
            }
            self.view.winner = winner;
        }
    }

    /// Report that this player finished setup with `board`.
    ///
    /// Re-reads the record first so an opponent who finished in the meantime is noticed.
    /// If both players are now done the game becomes active with player 1 to move.
    pub fn notify_setup_finished(&mut self, board: Board) -> Result<SetupStatus, GameError> {
        self.transaction(move |game| {
            let mut record = game.store.load()?;
            let current = SetupStatus::derive(record.setup_done(), game.slot);
            let next = match current {
                SetupStatus::NeitherDone => SetupStatus::YouDoneOppNot,
                SetupStatus::OppDoneYouNot => SetupStatus::Complete,
                other => {
                    error!("{} finished setup twice from {}", game.me, other);
                    return Err(GameError::IllegalTransition(other));
                }
            };

            let blob = board.to_blob()?;
            record.set_board(game.slot, blob.clone());
            record.mark_setup_done(game.slot);
            if next == SetupStatus::Complete {
                record.status = Status::Active;
                record.turn = Some(record.player1.clone());
            }
            game.store.save(&record)?;

            game.view.board = board;
            game.view.last_board_blob = Some(blob);
            game.view.opp_board = Board::from_blob(record.board(game.slot.other()))?;
            game.set_setup_status(next);
            game.set_status(record.status);
            game.set_your_turn(record.turn.as_deref() == Some(game.me.as_str()));
            info!("{} finished setup: {}", game.me, next);
            Ok(next)
        })
    }

    /// Aim this turn's photo at `coord` on the opponent's board, replacing any photo
    /// aimed earlier this turn. Nothing is committed until [`take_turn`][Self::take_turn].
    pub fn place_photo(&mut self, coord: Coordinate) -> Result<(), GameError> {
        self.transaction(|game| {
            game.require_turn()?;
            game.view.opp_board.clear_of_types(&[ObjectKind::Photo])?;
            game.view.opp_board.place(Photo::new(coord).into())?;
            debug!("{} aimed at {}", game.me, coord);
            Ok(())
        })
    }

    /// Resolve the pending photo on the opponent's board, commit the result and pass the
    /// turn, or win.
    pub fn take_turn(&mut self) -> Result<TurnOutcome, GameError> {
        self.transaction(|game| {
            game.require_turn()?;
            let shot = game.view.opp_board.resolve_shot()?;
            // The outcome already says which animal was finished.
            game.view.opp_board.take_fully_shot();
            let won = game.check_for_win();

            let mut record = game.store.load()?;
            game.require_record_turn(&record)?;
            record.set_board(game.slot.other(), game.view.opp_board.to_blob()?);
            if won {
                record.status = Status::Complete;
                record.winner = Some(game.me.clone());
                record.turn = None;
            } else {
                record.turn = Some(game.opponent.clone());
            }
            game.store.save(&record)?;

            game.events.push(GameEvent::SquareUpdated {
                side: Side::Opponent,
                coord: shot.coord(),
            });
            if let ShotOutcome::FullyShot(animal, _) = shot {
                game.events.push(GameEvent::AnimalFullyShot {
                    side: Side::Opponent,
                    animal,
                });
            }
            if won {
                game.apply_win();
            } else {
                game.set_your_turn(false);
            }

            let outcome = match shot {
                ShotOutcome::Miss(coord) => TurnOutcome::Miss(coord),
                ShotOutcome::Hit(animal, coord) => TurnOutcome::Hit(animal, coord),
                ShotOutcome::FullyShot(animal, coord) if won => TurnOutcome::Victory(animal, coord),
                ShotOutcome::FullyShot(animal, coord) => TurnOutcome::FullyShot(animal, coord),
            };
            info!("{} took a turn: {:?}", game.me, outcome);
            Ok(outcome)
        })
    }

    /// Whether every animal on the opponent's board has been photographed.
    pub fn check_for_win(&self) -> bool {
        self.view.opp_board.all_animals_shot()
    }

    /// Record this player as the winner and end the game.
    ///
    /// Only allowed on this player's turn of an active game, once every animal on the
    /// opponent's board has been photographed.
    pub fn set_win_state(&mut self) -> Result<(), GameError> {
        self.transaction(|game| {
            game.require_status(Status::Active)?;
            if !game.check_for_win() {
                return Err(GameError::NotWon);
            }
            let mut record = game.store.load()?;
            game.require_record_turn(&record)?;
            record.status = Status::Complete;
            record.winner = Some(game.me.clone());
            record.turn = None;
            game.store.save(&record)?;
            game.apply_win();
            Ok(())
        })
    }

    fn apply_win(&mut self) {
        info!("{} won", self.me);
        self.set_status(Status::Complete);
        self.set_your_turn(false);
        self.set_winner(Some(self.me.clone()));
    }

    /// Reconcile the opponent's latest commit of our own board.
    ///
    /// Presenting the same blob twice is a no-op. A different blob must carry exactly one
    /// new shot.
    pub fn resolve_turn_updates(
        &mut self,
        blob: Option<&str>,
    ) -> Result<Option<BoardChange>, GameError> {
        if blob == self.view.last_board_blob.as_deref() {
            debug!("{} board unchanged", self.me);
            return Ok(None);
        }
        self.transaction(|game| {
            let remote = Board::from_blob(blob)?;
            let change = match game.view.board.reconcile(&remote)? {
                Some(change) => change,
                None => {
                    error!("{} received a new board blob with no new shot", game.me);
                    return Err(GameError::UnchangedBoard);
                }
            };
            game.view.last_board_blob = blob.map(str::to_owned);
            game.events.push(GameEvent::SquareUpdated {
                side: Side::Own,
                coord: change.coord(),
            });
            if let Some(animal) = game.view.board.take_fully_shot() {
                game.events.push(GameEvent::AnimalFullyShot {
                    side: Side::Own,
                    animal,
                });
            }
            debug!("{} reconciled {:?}", game.me, change);
            Ok(Some(change))
        })
    }

    /// Reload the record and bring this view up to date with it.
    ///
    /// When the turn has come back to this player, or the opponent has just won, the
    /// opponent's shot is reconciled into our own board.
    pub fn refresh(&mut self) -> Result<(), GameError> {
        let record = self.store.load()?;
        self.transaction(move |game| {
            if record.status == Status::Active && record.turn.is_none() && record.winner.is_none()
            {
                error!("record for {} has nobody to move", game.me);
                return Err(GameError::NobodysTurn);
            }

            game.set_setup_status(SetupStatus::derive(record.setup_done(), game.slot));
            if game.view.opp_board.is_empty() && record.board(game.slot.other()).is_some() {
                game.view.opp_board = Board::from_blob(record.board(game.slot.other()))?;
                debug!("{} loaded the board of {}", game.me, game.opponent);
            }

            let your_turn = record.turn.as_deref() == Some(game.me.as_str());
            let opponent_won = record.winner.as_deref() == Some(game.opponent.as_str());
            let shot_at = (your_turn && !game.view.your_turn)
                || (opponent_won && game.view.winner.is_none());
            if shot_at {
                game.resolve_turn_updates(record.board(game.slot))?;
            }

            game.set_status(record.status);
            game.set_your_turn(your_turn);
            game.set_winner(record.winner.clone());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use super::*;
    use crate::{
        objects::Animal,
        store::{MemoryStore, StoreError},
    };

    fn coord(s: &str) -> Coordinate {
        s.parse().unwrap()
    }

    fn board_with(animals: &[(AnimalType, &str)]) -> Board {
        let mut board = Board::new();
        for &(animal, base) in animals {
            board
                .place(Animal::new(animal, coord(base)).unwrap().into())
                .unwrap();
        }
        board
    }

    /// Memory store whose saves can be made to fail.
    #[derive(Clone)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: Arc<AtomicBool>,
    }

    impl RecordStore for FlakyStore {
        fn load(&self) -> Result<GameRecord, StoreError> {
            self.inner.load()
        }

        fn save(&self, record: &GameRecord) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(StoreError::Other("offline".into()))
            } else {
                self.inner.save(record)
            }
        }
    }

    fn active_pair() -> (Game<MemoryStore>, Game<MemoryStore>) {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        let mut ana = Game::new(store.clone(), "ana").unwrap();
        let mut luis = Game::new(store, "luis").unwrap();
        ana.notify_setup_finished(board_with(&[(AnimalType::Flycatcher, "A1")]))
            .unwrap();
        luis.notify_setup_finished(board_with(&[(AnimalType::Snake, "C7")]))
            .unwrap();
        ana.refresh().unwrap();
        ana.drain_events();
        luis.drain_events();
        (ana, luis)
    }

    #[test]
    fn unknown_player_is_rejected() {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        assert!(matches!(
            Game::new(store, "marisol"),
            Err(GameError::NotAPlayer(_))
        ));
    }

    #[test]
    fn setup_handshake() {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        let mut ana = Game::new(store.clone(), "ana").unwrap();
        let mut luis = Game::new(store.clone(), "luis").unwrap();
        assert_eq!(ana.setup_status(), SetupStatus::NeitherDone);

        let status = luis
            .notify_setup_finished(board_with(&[(AnimalType::Snake, "C7")]))
            .unwrap();
        assert_eq!(status, SetupStatus::YouDoneOppNot);
        assert_eq!(luis.status(), Status::Setup);

        // Ana never refreshed, but finishing re-reads the record.
        let status = ana
            .notify_setup_finished(board_with(&[(AnimalType::Gila, "A1")]))
            .unwrap();
        assert_eq!(status, SetupStatus::Complete);
        assert_eq!(ana.status(), Status::Active);
        assert!(ana.your_turn());
        assert!(ana.opp_board().animal(AnimalType::Snake).is_some());
        assert_eq!(
            ana.drain_events(),
            vec![
                GameEvent::SetupStatusChanged(SetupStatus::Complete),
                GameEvent::StatusChanged(Status::Active),
                GameEvent::TurnChanged { your_turn: true },
            ]
        );

        luis.refresh().unwrap();
        assert_eq!(luis.setup_status(), SetupStatus::Complete);
        assert_eq!(luis.status(), Status::Active);
        assert!(!luis.your_turn());
        assert!(luis.opp_board().animal(AnimalType::Gila).is_some());

        assert!(matches!(
            luis.notify_setup_finished(Board::new()),
            Err(GameError::IllegalTransition(SetupStatus::Complete))
        ));
        let record = store.load().unwrap();
        assert_eq!(record.turn.as_deref(), Some("ana"));
    }

    #[test]
    fn turn_order_is_enforced() {
        let (mut ana, mut luis) = active_pair();
        assert!(matches!(
            luis.place_photo(coord("A1")),
            Err(GameError::NotYourTurn)
        ));
        assert!(matches!(ana.take_turn(), Err(GameError::Inconsistent(_))));
        assert!(ana.your_turn());
    }

    #[test]
    fn place_photo_replaces_pending_photo() {
        let (mut ana, _luis) = active_pair();
        ana.place_photo(coord("A1")).unwrap();
        ana.place_photo(coord("C6")).unwrap();
        assert_eq!(ana.opp_board().photo().map(Photo::coord), Some(coord("C6")));
        assert!(ana.opp_board().square(coord("A1")).unwrap().is_empty());
    }

    #[test]
    fn turn_passes_and_is_reconciled() {
        let (mut ana, mut luis) = active_pair();
        ana.place_photo(coord("C6")).unwrap();
        assert_eq!(
            ana.take_turn().unwrap(),
            TurnOutcome::Hit(AnimalType::Snake, coord("C6"))
        );
        assert!(!ana.your_turn());
        assert_eq!(
            ana.drain_events(),
            vec![
                GameEvent::SquareUpdated {
                    side: Side::Opponent,
                    coord: coord("C6")
                },
                GameEvent::TurnChanged { your_turn: false },
            ]
        );

        luis.refresh().unwrap();
        assert!(luis.your_turn());
        let snake = luis.board().animal(AnimalType::Snake).unwrap();
        assert!(snake.segment_at(coord("C6")).unwrap().shot());
        assert_eq!(
            luis.drain_events(),
            vec![
                GameEvent::SquareUpdated {
                    side: Side::Own,
                    coord: coord("C6")
                },
                GameEvent::TurnChanged { your_turn: true },
            ]
        );

        // Polling again changes nothing.
        luis.refresh().unwrap();
        assert!(luis.drain_events().is_empty());
        let blob = luis.store().load().unwrap().player2_board;
        assert_eq!(luis.resolve_turn_updates(blob.as_deref()).unwrap(), None);
    }

    #[test]
    fn new_blob_without_a_shot_is_rejected() {
        let (_ana, mut luis) = active_pair();
        let blob = board_with(&[(AnimalType::Snake, "C7")]).to_blob().unwrap();
        // Same contents, but presented as if it were new.
        let padded = format!(" {}", blob);
        assert!(matches!(
            luis.resolve_turn_updates(Some(&padded)),
            Err(GameError::UnchangedBoard)
        ));
    }

    #[test]
    fn failed_commit_rolls_back() {
        let fail = Arc::new(AtomicBool::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(GameRecord::new("ana", "luis")),
            fail: fail.clone(),
        };
        let mut ana = Game::new(store.clone(), "ana").unwrap();
        let mut luis = Game::new(store.clone(), "luis").unwrap();
        luis.notify_setup_finished(board_with(&[(AnimalType::Snake, "C7")]))
            .unwrap();
        ana.notify_setup_finished(board_with(&[(AnimalType::Gila, "A1")]))
            .unwrap();
        ana.drain_events();
        ana.place_photo(coord("C7")).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(matches!(ana.take_turn(), Err(GameError::Store(_))));
        assert!(ana.your_turn());
        assert!(ana.opp_board().photo().is_some());
        assert_eq!(ana.opp_board().animal(AnimalType::Snake).unwrap().remaining(), 3);
        assert!(ana.drain_events().is_empty());

        fail.store(false, Ordering::SeqCst);
        assert_eq!(
            ana.take_turn().unwrap(),
            TurnOutcome::Hit(AnimalType::Snake, coord("C7"))
        );
    }

    #[test]
    fn winning_ends_the_game() {
        let (mut ana, mut luis) = active_pair();
        let shots = [("C7", "A1"), ("C6", "B1")];
        for &(ana_shot, luis_shot) in &shots {
            ana.place_photo(coord(ana_shot)).unwrap();
            ana.take_turn().unwrap();
            luis.refresh().unwrap();
            luis.place_photo(coord(luis_shot)).unwrap();
            luis.take_turn().unwrap();
            ana.refresh().unwrap();
        }
        // Luis photographed both flycatcher squares before Ana finished the snake.
        assert_eq!(ana.status(), Status::Complete);
        assert_eq!(ana.winner(), Some("luis"));
        assert!(ana.board().all_animals_shot());
        assert!(!ana.your_turn());
        assert!(matches!(
            ana.place_photo(coord("C5")),
            Err(GameError::WrongStatus {
                actual: Status::Complete,
                ..
            })
        ));
        let record = luis.store().load().unwrap();
        assert_eq!(record.turn, None);
        assert_eq!(record.winner.as_deref(), Some("luis"));

        // The loser can't claim the game afterwards.
        assert!(matches!(
            ana.set_win_state(),
            Err(GameError::WrongStatus {
                actual: Status::Complete,
                ..
            })
        ));
        assert_eq!(ana.winner(), Some("luis"));
        let record = luis.store().load().unwrap();
        assert_eq!(record.winner.as_deref(), Some("luis"));
    }

    fn fully_shot(animal: AnimalType, base: &str) -> Board {
        let mut board = board_with(&[(animal, base)]);
        let cells: Vec<Coordinate> = board
            .animal(animal)
            .unwrap()
            .segments()
            .iter()
            .map(|seg| seg.coord())
            .collect();
        for cell in cells {
            board.place(Photo::new(cell).into()).unwrap();
            board.resolve_shot().unwrap();
        }
        board
    }

    #[test]
    fn win_state_needs_a_won_active_game() {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        let mut ana = Game::new(store.clone(), "ana").unwrap();
        assert!(matches!(
            ana.set_win_state(),
            Err(GameError::WrongStatus {
                actual: Status::Setup,
                ..
            })
        ));
        assert_eq!(store.load().unwrap().status, Status::Setup);

        let (mut ana, _luis) = active_pair();
        assert!(matches!(ana.set_win_state(), Err(GameError::NotWon)));
        let record = ana.store().load().unwrap();
        assert_eq!(record.status, Status::Active);
        assert_eq!(record.winner, None);

        ana.view.opp_board = fully_shot(AnimalType::Snake, "C7");
        ana.set_win_state().unwrap();
        assert_eq!(ana.status(), Status::Complete);
        assert_eq!(ana.winner(), Some("ana"));
        let record = ana.store().load().unwrap();
        assert_eq!(record.status, Status::Complete);
        assert_eq!(record.winner.as_deref(), Some("ana"));
        assert_eq!(record.turn, None);

        // Complete is terminal.
        assert!(matches!(
            ana.set_win_state(),
            Err(GameError::WrongStatus { .. })
        ));
    }

    #[test]
    fn stale_turn_is_not_committed() {
        let (mut ana, _luis) = active_pair();
        ana.place_photo(coord("C7")).unwrap();
        let mut record = ana.store().load().unwrap();
        let opp_blob = record.player2_board.clone();
        record.turn = Some("luis".to_owned());
        ana.store().save(&record).unwrap();

        assert!(matches!(ana.take_turn(), Err(GameError::NotYourTurn)));
        assert!(ana.your_turn());
        assert!(ana.opp_board().photo().is_some());
        assert!(ana.drain_events().is_empty());
        let record = ana.store().load().unwrap();
        assert_eq!(record.player2_board, opp_blob);
        assert_eq!(record.turn.as_deref(), Some("luis"));

        let mut record = ana.store().load().unwrap();
        record.status = Status::Complete;
        record.turn = None;
        record.winner = Some("luis".to_owned());
        ana.store().save(&record).unwrap();
        assert!(matches!(
            ana.take_turn(),
            Err(GameError::WrongStatus {
                actual: Status::Complete,
                ..
            })
        ));
        let record = ana.store().load().unwrap();
        assert_eq!(record.player2_board, opp_blob);
        assert_eq!(record.winner.as_deref(), Some("luis"));
    }

    #[test]
    fn garbled_blob_leaves_view_untouched() {
        let (mut ana, mut luis) = active_pair();
        ana.place_photo(coord("C7")).unwrap();
        ana.take_turn().unwrap();
        luis.refresh().unwrap();
        luis.drain_events();
        let board = luis.board().clone();
        let last_blob = luis.view.last_board_blob.clone();

        assert!(matches!(
            luis.resolve_turn_updates(Some("garbage")),
            Err(GameError::Codec(_))
        ));
        assert_eq!(luis.board(), &board);
        assert_eq!(luis.view.last_board_blob, last_blob);
        assert!(luis.drain_events().is_empty());
    }

    #[test]
    fn nobody_to_move_is_reported() {
        let (mut ana, _luis) = active_pair();
        let mut record = ana.store().load().unwrap();
        record.turn = None;
        ana.store().save(&record).unwrap();
        assert!(matches!(ana.refresh(), Err(GameError::NobodysTurn)));
        assert!(ana.your_turn());
    }
}
