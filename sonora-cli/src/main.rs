use std::{fs, io, path::PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, SeedableRng};
use regex::Regex;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sonora::{
    board::{Board, ObjectRecord},
    game::{GameEvent, GameRecord, Side, Status, TurnOutcome},
    objects::AnimalType,
    session::{Session, User},
    setup::PageAdvance,
    store::{FileStore, RecordStore},
    Coordinate, Game,
};

mod render;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the log subscriber")?;

    let record = Arg::with_name("record")
        .value_name("RECORD")
        .help("path of the JSON game record")
        .required(true);
    let player = Arg::with_name("as")
        .long("as")
        .value_name("NAME")
        .help("player to act as")
        .takes_value(true)
        .required(true);

    let matches = App::new("Sonora")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line front end for the Sonora desert-animal photography game.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("new")
                .about("create a new game record")
                .arg(record.clone().index(1))
                .arg(Arg::with_name("player1").required(true).index(2))
                .arg(Arg::with_name("player2").required(true).index(3)),
        )
        .subcommand(
            SubCommand::with_name("setup")
                .about("hide your animals, one per page, then report setup finished")
                .arg(record.clone().index(1))
                .arg(player.clone())
                .arg(
                    Arg::with_name("place")
                        .long("place")
                        .short("p")
                        .value_name("ANIMAL@COORD")
                        .help("place an animal with its bottom-left corner at COORD")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1),
                )
                .arg(
                    Arg::with_name("random")
                        .long("random")
                        .help("place animals at random for any remaining pages"),
                )
                .arg(
                    Arg::with_name("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("seed for random placement")
                        .takes_value(true)
                        .requires("random"),
                ),
        )
        .subcommand(
            SubCommand::with_name("shoot")
                .about("photograph a square of the opponent's board and end your turn")
                .arg(record.clone().index(1))
                .arg(player.clone())
                .arg(Arg::with_name("coord").value_name("COORD").required(true).index(2)),
        )
        .subcommand(
            SubCommand::with_name("poll")
                .about("check the game for changes")
                .arg(record.clone().index(1))
                .arg(player.clone()),
        )
        .subcommand(
            SubCommand::with_name("show")
                .about("print both boards")
                .arg(record.clone().index(1))
                .arg(player),
        )
        .subcommand(
            SubCommand::with_name("upload")
                .about("store a board given as a plain JSON list of object records")
                .arg(record.index(1))
                .arg(
                    Arg::with_name("to")
                        .long("to")
                        .value_name("NAME")
                        .help("player whose board is replaced")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::with_name("board").value_name("BOARD_JSON").required(true).index(2)),
        )
        .get_matches();

    match matches.subcommand() {
        ("new", Some(args)) => new_game(args),
        ("setup", Some(args)) => setup(args),
        ("shoot", Some(args)) => shoot(args),
        ("poll", Some(args)) => poll(args),
        ("show", Some(args)) => show(args),
        ("upload", Some(args)) => upload(args),
        _ => unreachable!(),
    }
}

/// Get the record path argument.
fn record_path(args: &ArgMatches) -> PathBuf {
    PathBuf::from(args.value_of("record").unwrap_or_default())
}

fn new_game(args: &ArgMatches) -> Result<()> {
    let path = record_path(args);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let record = GameRecord::new(
        args.value_of("player1").unwrap_or_default(),
        args.value_of("player2").unwrap_or_default(),
    );
    if record.player1 == record.player2 {
        bail!("players must have different names");
    }
    FileStore::create(&path, &record)?;
    info!("created {} for {} and {}", path.display(), record.player1, record.player2);
    Ok(())
}

/// Parse a placement written as `animal@coord`, such as `snake@C7`.
fn parse_placement(s: &str) -> Result<(AnimalType, Coordinate)> {
    static PLACEMENT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)\s*
        (?P<animal>[A-Za-z]+)\s*
        (?:@|\s)\s*
        (?P<coord>[A-Za-z][0-9]{1,2})\s*$",
        )
        .unwrap()
    });
    let captures = PLACEMENT
        .captures(s)
        .ok_or_else(|| anyhow!("invalid placement {:?}, expected ANIMAL@COORD", s))?;
    let animal = &captures["animal"];
    let animal = AnimalType::ALL
        .iter()
        .copied()
        .find(|candidate| candidate.name().eq_ignore_ascii_case(animal))
        .ok_or_else(|| anyhow!("unknown animal {:?}", animal))?;
    let coord = captures["coord"].parse()?;
    Ok((animal, coord))
}

fn setup(args: &ArgMatches) -> Result<()> {
    let name = args.value_of("as").unwrap_or_default();
    let mut session = Session::new(User::new(name));
    session.resume(FileStore::new(record_path(args)))?;

    let placements = args.values_of("place").into_iter().flatten();
    for placement in placements {
        let (animal, base) = parse_placement(placement)?;
        let setup = session.setup_mut();
        setup.select(animal).with_context(|| {
            format!(
                "page {} offers {:?}",
                setup.active_page() + 1,
                setup.available()
            )
        })?;
        setup.place_selected(base)?;
        match setup.advance_page()? {
            PageAdvance::NextPage(page) => debug!("moving on to page {}", page + 1),
            PageAdvance::SetupComplete => debug!("every page is placed"),
        }
    }

    if args.is_present("random") {
        let mut rng = match args.value_of("seed") {
            Some(seed) => StdRng::seed_from_u64(seed.parse().context("seed must be a number")?),
            None => StdRng::from_entropy(),
        };
        session.setup_mut().randomize(&mut rng)?;
    }

    let setup = session.setup();
    if !setup.is_complete() {
        bail!(
            "setup stopped on page {} of {}, place one of {:?} or pass --random",
            setup.active_page() + 1,
            setup.pages().len(),
            setup.available()
        );
    }
    let status = session.finish_setup()?;
    println!("setup: {}", status);
    if let Some(game) = session.game() {
        render::show_revealed_board(game.board());
    }
    Ok(())
}

/// Open a game view as the player named by `--as` and bring it up to date.
fn open_game(args: &ArgMatches) -> Result<Game<FileStore>> {
    let name = args.value_of("as").unwrap_or_default();
    let mut game = Game::new(FileStore::new(record_path(args)), name)?;
    game.refresh()?;
    Ok(game)
}

fn shoot(args: &ArgMatches) -> Result<()> {
    let coord: Coordinate = args.value_of("coord").unwrap_or_default().parse()?;
    let mut game = open_game(args)?;
    game.drain_events();
    game.place_photo(coord)?;
    match game.take_turn()? {
        TurnOutcome::Miss(coord) => println!("{}: nothing there", coord),
        TurnOutcome::Hit(animal, coord) => {
            println!("{}: photographed part of a {}", coord, animal)
        }
        TurnOutcome::FullyShot(animal, coord) => {
            println!("{}: photographed the whole {}", coord, animal)
        }
        TurnOutcome::Victory(animal, coord) => {
            println!("{}: photographed the whole {}, you win!", coord, animal)
        }
    }
    print_events(game.drain_events());
    render::show_obscured_board(game.opp_board());
    Ok(())
}

fn poll(args: &ArgMatches) -> Result<()> {
    let mut game = open_game(args)?;
    print_events(game.drain_events());
    print_summary(&game);
    Ok(())
}

fn show(args: &ArgMatches) -> Result<()> {
    let game = open_game(args)?;
    print_summary(&game);
    println!();
    println!("Your board:");
    render::show_revealed_board(game.board());
    println!();
    println!("{}'s board:", game.opponent());
    render::show_obscured_board(game.opp_board());
    Ok(())
}

fn upload(args: &ArgMatches) -> Result<()> {
    let board_path = args.value_of("board").unwrap_or_default();
    let data = fs::read(board_path).with_context(|| format!("could not read {}", board_path))?;
    let records: Vec<ObjectRecord> = serde_json::from_slice(&data)?;
    let board = Board::deserialize(&records)?;

    let store = FileStore::new(record_path(args));
    let mut record = store.load()?;
    let name = args.value_of("to").unwrap_or_default();
    let slot = record
        .slot_of(name)
        .ok_or_else(|| anyhow!("{} is not playing in this game", name))?;
    record.set_board(slot, board.to_blob()?);
    store.save(&record)?;
    info!("stored {} objects as the board of {}", board.contents().len(), name);
    Ok(())
}

fn print_summary<S: RecordStore>(game: &Game<S>) {
    println!("{} vs {}: {}", game.me(), game.opponent(), game.status());
    match game.status() {
        Status::Setup => println!("setup: {}", game.setup_status()),
        Status::Active if game.your_turn() => println!("your turn"),
        Status::Active => println!("waiting for {}", game.opponent()),
        Status::Complete => println!("winner: {}", game.winner().unwrap_or("nobody")),
    }
}

fn print_events(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::SetupStatusChanged(status) => println!("setup is now {}", status),
            GameEvent::StatusChanged(status) => println!("game is now {}", status),
            GameEvent::TurnChanged { your_turn: true } => println!("it's your turn"),
            GameEvent::TurnChanged { your_turn: false } => println!("turn passed"),
            GameEvent::SquareUpdated {
                side: Side::Own,
                coord,
            } => println!("your opponent photographed {}", coord),
            GameEvent::SquareUpdated {
                side: Side::Opponent,
                coord,
            } => println!("you photographed {}", coord),
            GameEvent::AnimalFullyShot {
                side: Side::Own,
                animal,
            } => println!("your {} was fully photographed", animal),
            GameEvent::AnimalFullyShot {
                side: Side::Opponent,
                animal,
            } => println!("you fully photographed their {}", animal),
            GameEvent::Won { winner } => println!("{} won the game", winner),
        }
    }
}
