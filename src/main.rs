use anyhow::Context;
use tracing::{error, info};

use maze_chase::api::{load_definition_file, GameClient, GameDefinition};
use maze_chase::app::App;
use maze_chase::config::{load_config, Config, DefinitionSource};
use maze_chase::game::Game;
use maze_chase::logging::setup_logging;

fn load_definition(config: &Config) -> anyhow::Result<GameDefinition> {
    let definition = match &config.source {
        DefinitionSource::File(path) => {
            load_definition_file(path).with_context(|| format!("reading {}", path.display()))?
        }
        DefinitionSource::Remote { game_id } => GameClient::new(&config.api_base_url)?
            .fetch(game_id)
            .with_context(|| format!("fetching game {game_id} from {}", config.api_base_url))?,
    };
    Ok(definition)
}

fn run() -> anyhow::Result<()> {
    let config = load_config()?;
    info!(source = ?config.source, "Configuration loaded");

    // The engine is only created from a successfully loaded definition
    let definition = load_definition(&config)?;
    let game = Game::new(&definition, config.game_options())?;
    let mut app = App::new(game, config.scale)?;

    info!("Starting game loop");
    while app.run() {}
    info!("Main loop exited");

    Ok(())
}

pub fn main() {
    setup_logging();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
