//! Integration test: a battle driven frame by frame
//!
//! Plays whole encounters through the frame driver the way the terminal
//! frontend does: press a key, advance a frame, watch the state stack.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tallgrass::battle::BattleSession;
use tallgrass::core::audio::SoundName;
use tallgrass::core::config::GameConfig;
use tallgrass::core::input::Key;
use tallgrass::creature::{CombatUnit, IndividualValues, SpeciesTable};
use tallgrass::game::{Game, GameContext, World};
use tallgrass::scenes::{Overworld, Scene};
use tallgrass::ui::RecordingRenderer;

const DT: f64 = 1.0 / 60.0;
/// Upper bound on any wait in these tests
const MAX_FRAMES: usize = 60 * 30;

fn unit(name: &str, level: u32, iv: u32) -> CombatUnit {
    SpeciesTable::bundled()
        .unwrap()
        .create_unit_with_ivs(name, level, IndividualValues::uniform(iv))
        .unwrap()
}

/// A game standing on the route with the welcome text dismissed.
fn game_with(player: CombatUnit) -> Game {
    let species = SpeciesTable::bundled().unwrap();
    let ctx = GameContext::new(
        GameConfig::default(),
        species,
        World::new(vec![player]),
        Box::new(ChaCha8Rng::seed_from_u64(7)),
    );
    let mut game = Game::new(ctx, Overworld::new());
    game.start();
    assert_eq!(game.scene_names(), vec!["overworld", "dialogue"]);
    press(&mut game, Key::Enter);
    assert_eq!(game.top_name(), Some("overworld"));
    game
}

fn press(game: &mut Game, key: Key) {
    game.ctx.input.press(key);
    game.frame(DT);
}

fn run_until(game: &mut Game, done: impl Fn(&Game) -> bool) -> bool {
    for _ in 0..MAX_FRAMES {
        if done(game) {
            return true;
        }
        game.frame(DT);
    }
    done(game)
}

fn shown_text(game: &Game) -> Option<String> {
    match game.top() {
        Some(Scene::BattleMessage(message)) => Some(message.text().to_string()),
        Some(Scene::Dialogue(dialogue)) => Some(dialogue.text().to_string()),
        _ => None,
    }
}

fn wait_for_text(game: &mut Game, text: &str) {
    assert!(
        run_until(game, |g| shown_text(g).as_deref() == Some(text)),
        "never showed {:?}, stack is {:?}",
        text,
        game.scene_names()
    );
}

fn wait_for_scene(game: &mut Game, name: &str) {
    assert!(
        run_until(game, |g| g.top_name() == Some(name)),
        "never reached {}, stack is {:?}",
        name,
        game.scene_names()
    );
}

/// Pushes a battle and clicks through the introduction up to the menu.
fn enter_battle(game: &mut Game, opponent: CombatUnit) {
    let opponent_name = opponent.name.clone();
    let player_name = game.ctx.world.party[0].name.clone();
    game.push(BattleSession::new(opponent));
    assert_eq!(game.top_name(), Some("battle"));
    assert!(game.ctx.world.party.is_empty());

    wait_for_text(game, &format!("A wild {} appeared!", opponent_name));
    assert!(game.ctx.audio.is_playing(&SoundName::BattleLoop));
    assert_eq!(game.ctx.audio.play_count(&SoundName::cry(&opponent_name)), 1);
    press(game, Key::Enter);

    wait_for_text(game, &format!("Go {}!", player_name));
    press(game, Key::Enter);

    wait_for_scene(game, "battle-menu");
    assert_eq!(game.ctx.audio.play_count(&SoundName::cry(&player_name)), 1);
}

// =============================================================================
// Entry
// =============================================================================

#[test]
fn test_entry_slides_units_to_rest() {
    let mut game = game_with(unit("Squirtle", 5, 10));
    enter_battle(&mut game, unit("Pidgey", 5, 5));

    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!((encounter.opponent.x, encounter.opponent.y), (280.0, 30.0));
    assert_eq!((encounter.player.x, encounter.player.y), (30.0, 96.0));
}

#[test]
fn test_battle_menu_renders_panels() {
    let mut game = game_with(unit("Squirtle", 5, 10));
    enter_battle(&mut game, unit("Pidgey", 5, 5));

    let mut renderer = RecordingRenderer::new();
    game.render(&mut renderer);
    assert!(renderer.contains_text("FIGHT"));
    assert!(renderer.contains_text("RUN"));
    assert!(renderer.contains_text("SQUIRTLE"));
    assert!(renderer.contains_text("PIDGEY"));
    assert!(renderer.contains_text("Lv5"));
    assert!(renderer.contains_text("19 / 19"));
}

// =============================================================================
// Outcomes
// =============================================================================

#[test]
fn test_fight_to_victory_awards_experience() {
    let mut game = game_with(unit("Squirtle", 50, 15));
    let before = game.ctx.world.party[0].current_experience;
    enter_battle(&mut game, unit("Pidgey", 2, 0));

    press(&mut game, Key::Enter);
    assert_eq!(game.top_name(), Some("battle-message"));
    assert_eq!(shown_text(&game).as_deref(), Some("Squirtle attacked Pidgey!"));

    wait_for_text(&mut game, "You won!");
    assert!(game.ctx.audio.is_playing(&SoundName::BattleVictory));
    assert!(!game.ctx.audio.is_playing(&SoundName::BattleLoop));
    assert!(game.ctx.audio.play_count(&SoundName::Faint) >= 1);
    press(&mut game, Key::Enter);

    // Pidgey: round(50 * 2 / 7)
    wait_for_text(&mut game, "Squirtle earned 14 experience points!");
    wait_for_scene(&mut game, "overworld");

    assert_eq!(game.depth(), 1);
    assert!(game.ctx.world.encounter.is_none());
    let lead = &game.ctx.world.party[0];
    assert_eq!(lead.current_experience, before + 14);
    assert_eq!(lead.level, 50);
    assert!(game.ctx.audio.is_playing(&SoundName::Route));
    assert!(!game.ctx.audio.is_playing(&SoundName::BattleVictory));
}

#[test]
fn test_battle_tasks_end_with_session() {
    let mut game = game_with(unit("Squirtle", 50, 15));
    enter_battle(&mut game, unit("Pidgey", 2, 0));

    press(&mut game, Key::Enter);
    wait_for_text(&mut game, "You won!");
    press(&mut game, Key::Enter);

    // The experience bar is still filling when the fade covers the battle
    assert!(run_until(&mut game, |g| !g.scene_names().contains(&"battle")));
    assert_eq!(game.scene_names(), vec!["overworld", "transition"]);
    // Only the reveal's curtain is left running
    assert_eq!(game.ctx.scheduler.len(), 1);
}

#[test]
fn test_run_always_escapes() {
    let mut game = game_with(unit("Squirtle", 5, 10));
    enter_battle(&mut game, unit("Rattata", 5, 5));

    press(&mut game, Key::Down);
    press(&mut game, Key::Enter);
    assert_eq!(shown_text(&game).as_deref(), Some("Got away safely"));
    assert_eq!(game.ctx.audio.play_count(&SoundName::BattleRun), 1);

    // Timed message ignores Enter
    press(&mut game, Key::Enter);
    assert_eq!(shown_text(&game).as_deref(), Some("Got away safely"));

    wait_for_scene(&mut game, "overworld");
    assert!(game.ctx.world.encounter.is_none());
    let lead = &game.ctx.world.party[0];
    assert_eq!(lead.name, "Squirtle");
    assert_eq!(lead.current_health, lead.health);
    assert!(!game.ctx.audio.is_playing(&SoundName::BattleLoop));
    assert!(game.ctx.audio.is_playing(&SoundName::Route));
}

#[test]
fn test_defeat_returns_to_route_and_heals() {
    let mut game = game_with(unit("Caterpie", 2, 0));
    enter_battle(&mut game, unit("Rattata", 40, 31));

    press(&mut game, Key::Enter);
    // The faster opponent opens
    assert_eq!(shown_text(&game).as_deref(), Some("Rattata attacked Caterpie!"));

    wait_for_text(&mut game, "Caterpie fainted!");
    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!(encounter.player.current_health, 0);
    // A fainted unit never gets its own attack
    assert_eq!(encounter.opponent.current_health, encounter.opponent.health);
    assert!(game.ctx.audio.play_count(&SoundName::Faint) >= 1);
    press(&mut game, Key::Enter);

    wait_for_scene(&mut game, "overworld");
    let lead = &game.ctx.world.party[0];
    assert_eq!(lead.name, "Caterpie");
    assert_eq!(lead.current_health, lead.health);
}

#[test]
fn test_exact_threshold_levels_up_once() {
    let mut player = unit("Bulbasaur", 5, 31);
    // Caterpie at level 2 is worth round(39 * 2 / 7) = 11
    player.current_experience = 216 - 11;
    let mut game = game_with(player);
    enter_battle(&mut game, unit("Caterpie", 2, 0));

    // 7 damage a hit against 13 health: two rounds
    press(&mut game, Key::Enter);
    wait_for_scene(&mut game, "battle-menu");
    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!(encounter.opponent.current_health, 6);
    assert_eq!(encounter.player.current_health, 21 - 3);

    press(&mut game, Key::Enter);
    wait_for_text(&mut game, "You won!");
    press(&mut game, Key::Enter);

    wait_for_text(&mut game, "Bulbasaur grew to LV. 6!");
    assert_eq!(game.ctx.audio.play_count(&SoundName::ExperienceFull), 1);
    // The bar stays full against the level the experience was earned in
    for _ in 0..70 {
        game.frame(DT);
    }
    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!(encounter.player.level, 6);
    assert_eq!(encounter.experience_span, 91.0);
    assert_eq!(encounter.experience_shown, 91.0);
    press(&mut game, Key::Enter);

    assert_eq!(game.top_name(), Some("dialogue"));
    let summary = shown_text(&game).unwrap();
    assert!(summary.starts_with("Health: 21 > 23\nAttack: 11 > 12"), "{}", summary);
    press(&mut game, Key::Enter);

    wait_for_scene(&mut game, "overworld");
    let lead = &game.ctx.world.party[0];
    assert_eq!(lead.level, 6);
    assert_eq!(lead.current_experience, 216);
    assert_eq!(lead.target_experience, 343);
}

#[test]
fn test_health_bar_drains_after_hit() {
    let mut game = game_with(unit("Bulbasaur", 5, 31));
    enter_battle(&mut game, unit("Caterpie", 2, 0));

    press(&mut game, Key::Enter);
    wait_for_scene(&mut game, "battle-menu");
    // Give the one-second drain time to finish
    for _ in 0..70 {
        game.frame(DT);
    }
    let encounter = game.ctx.world.encounter.as_ref().unwrap();
    assert_eq!(encounter.opponent_health_shown, 6.0);
    assert_eq!(encounter.player_health_shown, 18.0);
}
