//! Integration test: title, route and transitions
//!
//! Drives the non-battle states through the frame driver and checks the
//! stack, the world and the audio they leave behind.

use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tallgrass::core::audio::SoundName;
use tallgrass::core::config::GameConfig;
use tallgrass::core::constants::{CAROUSEL_MID, CAROUSEL_START, TILE_SIZE};
use tallgrass::core::input::Key;
use tallgrass::creature::{IndividualValues, SpeciesTable};
use tallgrass::game::{Direction, Game, GameContext, TileMap, Walker, World};
use tallgrass::scenes::Overworld;
use tallgrass::ui::RecordingRenderer;

const DT: f64 = 1.0 / 60.0;

fn advance(game: &mut Game, seconds: f64) {
    let frames = (seconds / DT).round() as usize;
    for _ in 0..frames {
        game.frame(DT);
    }
}

fn press(game: &mut Game, key: Key) {
    game.ctx.input.press(key);
    game.frame(DT);
}

fn run_until(game: &mut Game, done: impl Fn(&Game) -> bool) -> bool {
    for _ in 0..60 * 10 {
        if done(game) {
            return true;
        }
        game.frame(DT);
    }
    done(game)
}

fn title_game() -> Game {
    let config = GameConfig {
        starting_species: Some("Squirtle".to_string()),
        ..Default::default()
    };
    let mut game = Game::from_config(config, Box::new(ChaCha8Rng::seed_from_u64(1))).unwrap();
    game.start();
    game
}

/// A route game on a custom map with the welcome text dismissed.
fn route_game(rows: &[&str], spawn: (i32, i32), encounter_chance: f64) -> Game {
    let species = SpeciesTable::bundled().unwrap();
    let lead = species
        .create_unit_with_ivs("Charmander", 5, IndividualValues::uniform(10))
        .unwrap();
    let config = GameConfig {
        encounter_chance,
        ..Default::default()
    };
    let mut world = World::new(vec![lead]);
    world.map = TileMap::from_rows(rows);
    world.walker = Walker::at(spawn.0, spawn.1);
    let ctx = GameContext::new(config, species, world, Box::new(ChaCha8Rng::seed_from_u64(9)));
    let mut game = Game::new(ctx, Overworld::new());
    game.start();
    press(&mut game, Key::Enter);
    game
}

// =============================================================================
// Title screen
// =============================================================================

#[test]
fn test_title_starts_with_carousel() {
    let mut game = title_game();
    assert_eq!(game.scene_names(), vec!["title"]);
    assert!(game.ctx.audio.is_playing(&SoundName::Title));
    assert_eq!(game.ctx.world.party[0].name, "Squirtle");

    let first = game.ctx.world.showcase.clone().unwrap();
    assert_eq!(first.species, "Bulbasaur");
    assert_eq!((first.x, first.y), CAROUSEL_START);

    advance(&mut game, 0.6);
    let showcase = game.ctx.world.showcase.as_ref().unwrap();
    assert_eq!((showcase.x, showcase.y), CAROUSEL_MID);

    let mut renderer = RecordingRenderer::new();
    game.render(&mut renderer);
    assert!(renderer.contains_text("Tallgrass"));
    assert!(renderer.contains_text("Press Enter"));
}

#[test]
fn test_carousel_moves_to_next_starter() {
    let mut game = title_game();
    advance(&mut game, 2.7);
    let showcase = game.ctx.world.showcase.as_ref().unwrap();
    assert_eq!(showcase.species, "Charmander");
    assert_eq!((showcase.x, showcase.y), CAROUSEL_START);

    // The repeating task slides it on again each period
    advance(&mut game, 0.9);
    let showcase = game.ctx.world.showcase.as_ref().unwrap();
    assert_eq!(showcase.species, "Charmander");
    assert_eq!((showcase.x, showcase.y), CAROUSEL_MID);
}

#[test]
fn test_enter_fades_into_route() {
    let mut game = title_game();
    advance(&mut game, 1.0);
    press(&mut game, Key::Enter);
    assert_eq!(game.scene_names(), vec!["title", "transition"]);

    // Covered, then revealed on top of the welcome text
    assert!(run_until(&mut game, |g| g.scene_names() == vec!["overworld", "dialogue"]));
    assert!(!game.ctx.audio.is_playing(&SoundName::Title));
    assert!(game.ctx.audio.is_playing(&SoundName::Route));
    assert!(game.ctx.world.showcase.is_none());
    assert_eq!(game.ctx.world.curtain, 0.0);
    // Every carousel task went with the title screen
    assert!(game.ctx.scheduler.is_empty());

    // Nothing left over fires later
    advance(&mut game, 4.0);
    assert_eq!(game.scene_names(), vec!["overworld", "dialogue"]);
}

#[test]
fn test_transition_covers_screen_midway() {
    let mut game = title_game();
    press(&mut game, Key::Enter);
    advance(&mut game, 0.25);
    let curtain = game.ctx.world.curtain;
    assert!(curtain > 0.3 && curtain < 0.7, "curtain at {}", curtain);
}

// =============================================================================
// Route
// =============================================================================

const ROOM: [&str; 3] = ["###", "#.#", "###"];
const GRASS_STRIP: [&str; 3] = ["#####", "#.\"\"#", "#####"];

#[test]
fn test_walls_bump() {
    let mut game = route_game(&ROOM, (1, 1), 0.0);
    press(&mut game, Key::Up);

    let walker = &game.ctx.world.walker;
    assert_eq!((walker.col, walker.row), (1, 1));
    assert_eq!(walker.facing, Direction::Up);
    assert_eq!(game.ctx.audio.play_count(&SoundName::PlayerBump), 1);
}

#[test]
fn test_step_tweens_one_tile() {
    let mut game = route_game(&GRASS_STRIP, (1, 1), 0.0);
    press(&mut game, Key::Right);
    assert_eq!(game.ctx.world.walker.col, 2);
    assert!(game.ctx.world.walker.x < 2.0 * TILE_SIZE);

    advance(&mut game, 0.3);
    assert_eq!(game.ctx.world.walker.x, 2.0 * TILE_SIZE);
    // Grass without luck: still on the route
    assert_eq!(game.scene_names(), vec!["overworld"]);
}

#[test]
fn test_grass_starts_encounter() {
    let mut game = route_game(&GRASS_STRIP, (1, 1), 1.0);
    press(&mut game, Key::Right);
    advance(&mut game, 0.3);

    assert!(!game.ctx.audio.is_playing(&SoundName::Route));
    assert_eq!(game.ctx.audio.play_count(&SoundName::BattleStart), 1);
    assert_eq!(game.top_name(), Some("transition"));

    assert!(run_until(&mut game, |g| g.top_name() == Some("battle")));
    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!(encounter.player.name, "Charmander");
    let level = encounter.opponent.level;
    assert!((3..=6).contains(&level), "opponent level {}", level);
    assert!(game.ctx.world.party.is_empty());
}

#[test]
fn test_heal_restores_party() {
    let mut game = route_game(&ROOM, (1, 1), 0.0);
    game.ctx.world.party[0].current_health = 1;

    press(&mut game, Key::Heal);
    assert_eq!(game.top_name(), Some("dialogue"));
    assert!(game.ctx.audio.is_paused(&SoundName::Route));
    assert_eq!(game.ctx.audio.play_count(&SoundName::Heal), 1);
    let lead = &game.ctx.world.party[0];
    assert_eq!(lead.current_health, lead.health);

    press(&mut game, Key::Enter);
    assert_eq!(game.top_name(), Some("overworld"));
    assert!(game.ctx.audio.is_playing(&SoundName::Route));
}

#[test]
fn test_stats_view_opens_and_closes() {
    let mut game = route_game(&ROOM, (1, 1), 0.0);
    press(&mut game, Key::Escape);
    assert_eq!(game.top_name(), Some("stats-view"));
    assert_eq!(game.ctx.audio.play_count(&SoundName::MenuOpen), 1);

    let mut renderer = RecordingRenderer::new();
    game.render(&mut renderer);
    assert!(renderer.contains_text("Charmander"));
    assert!(renderer.contains_text("Attack: "));

    press(&mut game, Key::Escape);
    assert_eq!(game.top_name(), Some("overworld"));
}

#[test]
fn test_forced_rng_picks_encounter() {
    // StepRng(0, 0) makes every roll land low, so the chance always hits
    let species = SpeciesTable::bundled().unwrap();
    let lead = species.create_unit("Squirtle", 5, &mut StepRng::new(0, 0)).unwrap();
    let mut world = World::new(vec![lead]);
    world.map = TileMap::from_rows(&GRASS_STRIP);
    world.walker = Walker::at(1, 1);
    let config = GameConfig {
        encounter_chance: 0.5,
        ..Default::default()
    };
    let ctx = GameContext::new(config, species, world, Box::new(StepRng::new(0, 0)));
    let mut game = Game::new(ctx, Overworld::new());
    game.start();
    press(&mut game, Key::Enter);

    press(&mut game, Key::Right);
    advance(&mut game, 0.3);
    assert_eq!(game.top_name(), Some("transition"));
}
