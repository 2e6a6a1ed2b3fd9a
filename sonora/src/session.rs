//! Ties a signed-in user to their setup and current game.
//!
//! A [`Session`] is handed down by reference to whatever drives the engine, so nothing
//! needs to reach for global state to find the current game.
use thiserror::Error;
use tracing::info;

use crate::{
    game::{Game, GameError, SetupStatus},
    setup::GameSetup,
    store::RecordStore,
};

/// A player, identified by name.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct User {
    name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reason a session operation failed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No game has been resumed yet.
    #[error("no game is open")]
    NoGame,
    /// Setup still has pages left.
    #[error("setup is not complete")]
    SetupIncomplete,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Owns the user, the setup in progress and the open game.
pub struct Session<S: RecordStore> {
    user: User,
    setup: GameSetup,
    game: Option<Game<S>>,
}

impl<S: RecordStore> Session<S> {
    /// Start a session for `user` with a fresh setup and no open game.
    pub fn new(user: User) -> Self {
        Self::with_setup(user, GameSetup::new())
    }

    /// Start a session that stages placements in `setup`.
    pub fn with_setup(user: User, setup: GameSetup) -> Self {
        Self {
            user,
            setup,
            game: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn setup_mut(&mut self) -> &mut GameSetup {
        &mut self.setup
    }

    pub fn game(&self) -> Option<&Game<S>> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game<S>> {
        self.game.as_mut()
    }

    /// Open the user's view of the game in `store`, replacing any open game, and start a
    /// fresh setup.
    pub fn resume(&mut self, store: S) -> Result<&mut Game<S>, SessionError> {
        let game = Game::new(store, self.user.name())?;
        info!("{} resumed game against {}", self.user.name, game.opponent());
        self.setup.reset();
        Ok(self.game.insert(game))
    }

    /// Hand the completed setup board to the open game. The setup is reset only once the
    /// game accepts it.
    pub fn finish_setup(&mut self) -> Result<SetupStatus, SessionError> {
        let game = self.game.as_mut().ok_or(SessionError::NoGame)?;
        if !self.setup.is_complete() {
            return Err(SessionError::SetupIncomplete);
        }
        let status = game.notify_setup_finished(self.setup.board().clone())?;
        self.setup.reset();
        Ok(status)
    }

    /// Throw away the setup in progress.
    pub fn abandon_setup(&mut self) {
        self.setup.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::{GameRecord, Status},
        objects::AnimalType,
        store::MemoryStore,
    };

    fn complete_setup(setup: &mut GameSetup, animal: AnimalType, base: &str) {
        setup.select(animal).unwrap();
        setup.place_selected(base.parse().unwrap()).unwrap();
        setup.advance_page().unwrap();
    }

    #[test]
    fn finish_setup_requires_game_and_complete_setup() {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        let pages = vec![[AnimalType::Snake, AnimalType::Gila]];
        let mut session =
            Session::with_setup(User::new("ana"), GameSetup::with_pages(pages).unwrap());
        assert!(matches!(session.finish_setup(), Err(SessionError::NoGame)));

        session.resume(store.clone()).unwrap();
        assert!(matches!(
            session.finish_setup(),
            Err(SessionError::SetupIncomplete)
        ));

        complete_setup(session.setup_mut(), AnimalType::Gila, "D4");
        assert_eq!(session.finish_setup().unwrap(), SetupStatus::YouDoneOppNot);
        assert!(!session.setup().is_complete());
        assert!(session.setup().board().is_empty());
        let game = session.game().unwrap();
        assert!(game.board().animal(AnimalType::Gila).is_some());
        assert_eq!(game.status(), Status::Setup);
        assert!(store.load().unwrap().player1_setup_done);
    }

    #[test]
    fn rejected_finish_keeps_setup() {
        let store = MemoryStore::new(GameRecord::new("ana", "luis"));
        let pages = vec![[AnimalType::Snake, AnimalType::Gila]];
        let mut session =
            Session::with_setup(User::new("ana"), GameSetup::with_pages(pages).unwrap());
        session.resume(store).unwrap();
        complete_setup(session.setup_mut(), AnimalType::Snake, "C7");
        session.finish_setup().unwrap();

        complete_setup(session.setup_mut(), AnimalType::Snake, "C7");
        assert!(matches!(
            session.finish_setup(),
            Err(SessionError::Game(GameError::IllegalTransition(_)))
        ));
        assert!(session.setup().is_complete());
        session.abandon_setup();
        assert!(!session.setup().is_complete());
    }
}
