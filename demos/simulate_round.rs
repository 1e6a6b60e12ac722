use mathsalamaison_rs::board::BoardLayout;
use mathsalamaison_rs::bots::{CategoryHunterBot, RandomBot, ScholarBot};
use mathsalamaison_rs::game::{Game, Player, RoundConfig};
use mathsalamaison_rs::question::QuestionBank;

fn main() {
    let config = RoundConfig {
        dice_max: 4,
        required_points: 10,
        seed: 42,
        ..RoundConfig::default()
    };
    let roster = || vec![Player::new("Ada"), Player::new("Blaise")];

    // Example 1: Two RandomBots
    println!("Example 1: RandomBot vs RandomBot");
    let mut game1 = Game::new(
        config.clone(),
        Some(BoardLayout::classic()),
        roster(),
        QuestionBank::sample(config.seed),
    )
    .expect("valid roster");
    report(game1.play(&[RandomBot, RandomBot]).map(|_| ()), &game1);

    // Example 2: Two ScholarBots
    println!("\nExample 2: ScholarBot vs ScholarBot");
    let mut game2 = Game::new(
        config.clone(),
        Some(BoardLayout::classic()),
        roster(),
        QuestionBank::sample(config.seed),
    )
    .expect("valid roster");
    let scholars = [ScholarBot::new(Some(0.9)), ScholarBot::new(Some(0.6))];
    report(game2.play(&scholars).map(|_| ()), &game2);

    // Example 3: CategoryHunterBot vs CategoryHunterBot
    println!("\nExample 3: CategoryHunterBot vs CategoryHunterBot");
    let mut game3 = Game::new(
        config.clone(),
        Some(BoardLayout::classic()),
        roster(),
        QuestionBank::sample(config.seed),
    )
    .expect("valid roster");
    let hunters = [CategoryHunterBot::new(Some(0.8)), CategoryHunterBot::new(Some(0.8))];
    report(game3.play(&hunters).map(|_| ()), &game3);
}

fn report<S>(result: Result<(), mathsalamaison_rs::game::GameError>, game: &Game<S>) {
    if let Err(err) = result {
        println!("  Game aborted: {err}");
        return;
    }
    match game.winner() {
        Some(player) => println!(
            "  Winner: {} in {} turns ({} pts)",
            player.name,
            game.round.turn_number() + 1,
            player.points
        ),
        None => println!("  Game exceeded turn limit at {} turns", game.round.turn_number()),
    }
}
