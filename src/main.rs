use anyhow::Result;
use clap::Parser;
use snake_arcade::game::ArenaConfig;
use snake_arcade::modes::ArcadeMode;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Classic arcade snake with variable game speed")]
struct Cli {
    /// Arena width in world units
    #[arg(long, default_value = "800")]
    width: f32,

    /// Arena height in world units
    #[arg(long, default_value = "600")]
    height: f32,

    /// Wall thickness in world units
    #[arg(long, default_value = "60")]
    wall_thickness: f32,

    /// Baseline tick interval in milliseconds
    #[arg(long, default_value = "12")]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ArenaConfig {
        width: cli.width,
        height: cli.height,
        wall_thickness: cli.wall_thickness,
        base_interval: cli.tick_ms as f32 / 1000.0,
        ..Default::default()
    };

    let mut mode = ArcadeMode::new(config)?;
    mode.run().await?;

    if mode.game_over() {
        println!("Game Over");
    }
    println!("Your Score: {}", mode.score());

    Ok(())
}
