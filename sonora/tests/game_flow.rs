use sonora::{
    game::{GameEvent, GameRecord, SetupStatus, Side, Status, TurnOutcome},
    objects::AnimalType,
    session::{Session, User},
    setup::{GameSetup, PageAdvance},
    store::{FileStore, MemoryStore, RecordStore},
    Coordinate, Game,
};

fn coord(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn single_page_setup(animal: AnimalType, base: &str) -> GameSetup {
    let mut setup = GameSetup::with_pages(vec![[animal, AnimalType::Bobcat]]).unwrap();
    setup.select(animal).unwrap();
    setup.place_selected(coord(base)).unwrap();
    assert_eq!(setup.advance_page().unwrap(), PageAdvance::SetupComplete);
    setup
}

fn start<S: RecordStore + Clone>(store: S) -> (Game<S>, Game<S>) {
    let mut ana = Game::new(store.clone(), "ana").unwrap();
    let mut luis = Game::new(store, "luis").unwrap();
    let board = single_page_setup(AnimalType::Gila, "A1").finish().unwrap();
    assert_eq!(
        ana.notify_setup_finished(board).unwrap(),
        SetupStatus::YouDoneOppNot
    );
    let board = single_page_setup(AnimalType::Snake, "C7").finish().unwrap();
    assert_eq!(
        luis.notify_setup_finished(board).unwrap(),
        SetupStatus::Complete
    );
    ana.refresh().unwrap();
    (ana, luis)
}

#[test]
fn snake_hunt() {
    let store = MemoryStore::new(GameRecord::new("ana", "luis"));
    let (mut ana, mut luis) = start(store.clone());
    assert!(ana.your_turn());
    assert_eq!(ana.status(), Status::Active);

    let snake = luis.board().animal(AnimalType::Snake).unwrap();
    let cells: Vec<String> = snake
        .segments()
        .iter()
        .map(|seg| seg.coord().to_string())
        .collect();
    assert_eq!(cells, ["C7", "C6", "C5"]);

    ana.place_photo(coord("C7")).unwrap();
    assert_eq!(
        ana.take_turn().unwrap(),
        TurnOutcome::Hit(AnimalType::Snake, coord("C7"))
    );
    luis.refresh().unwrap();
    let snake = luis.board().animal(AnimalType::Snake).unwrap();
    assert!(snake.segment_at(coord("C7")).unwrap().shot());
    assert!(!snake.shot());

    for &(ana_shot, luis_shot) in &[("J10", "C6"), ("J9", "C5")] {
        luis.place_photo(coord(ana_shot)).unwrap();
        assert_eq!(luis.take_turn().unwrap(), TurnOutcome::Miss(coord(ana_shot)));
        ana.refresh().unwrap();
        assert!(ana.board().misses().any(|miss| miss.coord() == coord(ana_shot)));

        ana.place_photo(coord(luis_shot)).unwrap();
        let outcome = ana.take_turn().unwrap();
        if luis_shot == "C5" {
            assert_eq!(outcome, TurnOutcome::Victory(AnimalType::Snake, coord("C5")));
        } else {
            assert_eq!(outcome, TurnOutcome::Hit(AnimalType::Snake, coord("C6")));
            luis.refresh().unwrap();
        }
    }

    assert!(ana.check_for_win());
    assert_eq!(ana.winner(), Some("ana"));
    assert_eq!(ana.status(), Status::Complete);
    let record = store.load().unwrap();
    assert_eq!(record.status, Status::Complete);
    assert_eq!(record.turn, None);
    assert_eq!(record.winner.as_deref(), Some("ana"));

    luis.drain_events();
    luis.refresh().unwrap();
    assert!(luis.board().all_animals_shot());
    assert_eq!(luis.winner(), Some("ana"));
    assert_eq!(
        luis.drain_events(),
        vec![
            GameEvent::SquareUpdated {
                side: Side::Own,
                coord: coord("C5")
            },
            GameEvent::AnimalFullyShot {
                side: Side::Own,
                animal: AnimalType::Snake
            },
            GameEvent::StatusChanged(Status::Complete),
            GameEvent::Won {
                winner: "ana".to_owned()
            },
        ]
    );

    // Seeing the final record again changes nothing.
    luis.refresh().unwrap();
    assert!(luis.drain_events().is_empty());
}

#[test]
fn file_backed_game() {
    let path = std::env::temp_dir().join(format!("sonora-flow-{}.json", std::process::id()));
    let store = FileStore::create(&path, &GameRecord::new("ana", "luis")).unwrap();
    let (mut ana, mut luis) = start(store);
    ana.place_photo(coord("E5")).unwrap();
    assert_eq!(ana.take_turn().unwrap(), TurnOutcome::Miss(coord("E5")));
    luis.refresh().unwrap();
    assert!(luis.your_turn());
    assert_eq!(luis.board().misses().count(), 1);

    // A view opened later sees the same state.
    let reopened = Game::new(FileStore::new(&path), "luis").unwrap();
    assert_eq!(reopened.board(), luis.board());
    assert!(reopened.your_turn());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn sessions_share_a_game() {
    let store = MemoryStore::new(GameRecord::new("ana", "luis"));
    let mut ana = Session::new(User::new("ana"));
    let mut luis = Session::new(User::new("luis"));

    ana.setup_mut().select(AnimalType::Pyrrhuloxia).unwrap();
    ana.setup_mut().place_selected(coord("J10")).unwrap();
    // Resuming starts a fresh setup.
    ana.resume(store.clone()).unwrap();
    assert!(ana.setup().board().is_empty());
    let setup = ana.setup_mut();
    setup.select(AnimalType::Flycatcher).unwrap();
    setup.place_selected(coord("B3")).unwrap();
    setup.advance_page().unwrap();
    for &(animal, base) in &[
        (AnimalType::Centipede, "A10"),
        (AnimalType::Gila, "E10"),
        (AnimalType::Javelina, "H10"),
        (AnimalType::Bighorn, "E7"),
    ] {
        setup.select(animal).unwrap();
        setup.place_selected(coord(base)).unwrap();
        setup.advance_page().unwrap();
    }
    assert_eq!(ana.finish_setup().unwrap(), SetupStatus::YouDoneOppNot);

    luis.resume(store).unwrap();
    assert_eq!(
        luis.game().unwrap().setup_status(),
        SetupStatus::OppDoneYouNot
    );
    let setup = luis.setup_mut();
    for &(animal, base) in &[
        (AnimalType::Pyrrhuloxia, "A2"),
        (AnimalType::Snake, "C7"),
        (AnimalType::Jackrabbit, "E10"),
        (AnimalType::Ringtail, "G4"),
        (AnimalType::Bobcat, "A10"),
    ] {
        setup.select(animal).unwrap();
        setup.place_selected(coord(base)).unwrap();
        setup.advance_page().unwrap();
    }
    assert_eq!(luis.finish_setup().unwrap(), SetupStatus::Complete);

    let game = ana.game_mut().unwrap();
    game.refresh().unwrap();
    assert!(game.your_turn());
    assert_eq!(game.opp_board().animals().count(), 5);
}
