use anyhow::{Result, bail};
use tracing::info;

use arbiter_match::players::{InteractivePlayer, RandomPlayer};
use arbiter_match::{Game, Player, Untimed};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let white = pick_player(args.next().as_deref().unwrap_or("interactive"))?;
    let black = pick_player(args.next().as_deref().unwrap_or("interactive"))?;

    info!("starting game");
    let outcome = Game::play(white, black, &Untimed);
    println!("{outcome}");
    Ok(())
}

/// Map a command-line name to a player implementation.
fn pick_player(name: &str) -> Result<Box<dyn Player>> {
    match name {
        "interactive" => Ok(Box::new(InteractivePlayer::new())),
        "random" => Ok(Box::new(RandomPlayer::new())),
        other => bail!("unknown player {other:?}: expected \"interactive\" or \"random\""),
    }
}
