use cpath::{
    algorithms::default_generators,
    api::{self, MazeRequest, PathRequest, RequestError},
    grid::Grid,
};

use std::path::Path;

use log::LevelFilter;

use crate::{logging, settings::Settings, Error};

/// What a command prints, the response goes to stdout and the rendering to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub response: String,
    pub render: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MazeOptions {
    pub generator: Option<String>,
    pub rows: Option<i32>,
    pub columns: Option<i32>,
    pub seed: Option<u64>,
    pub render: bool,
}

/// Loads the settings with the logger already in place, so messages of the load are not lost.
///
/// The logger starts at the default level and is raised to the configured one afterwards.
pub fn setup(settings_path: &Path, verbose: u8) -> Result<Settings, Error> {
    logging::init(logging::raise(LevelFilter::Warn, verbose));

    let settings = Settings::load(settings_path)?;
    logging::init(logging::raise(settings.get_log_level(), verbose));

    Ok(settings)
}

/// Solves the path request in `input` with the named strategy, or the configured one.
pub fn solve(
    settings: &Settings,
    strategy: Option<&str>,
    input: &str,
    render: bool,
) -> Result<Output, Error> {
    let strategy = match strategy {
        Some(name) => api::parse_strategy(name)?,
        None => api::parse_strategy(&settings.get_default_strategy())?,
    };

    let request = PathRequest::from_json(input)?;
    let response = api::solve(&request, strategy)?;
    log::info!(
        "{strategy}: {} steps, solution of {} cells",
        response.steps.len(),
        response.solution.len()
    );

    let render = if render {
        let grid = Grid::build(request.size(), &request.walls).map_err(RequestError::from)?;
        Some(grid.render_with(&response.solution, &response.steps))
    } else {
        None
    };

    Ok(Output {
        response: serde_json::to_string(&response)?,
        render,
    })
}

/// Generates a maze.
///
/// The request is read from `input` when there is one, options given on the command line take
/// precedence over it and the settings fill in the rest.
pub fn maze(
    settings: &Settings,
    options: &MazeOptions,
    input: Option<&str>,
) -> Result<Output, Error> {
    let mut request = match input {
        Some(input) => MazeRequest::from_json(input)?,
        None => MazeRequest::new(settings.get_maze_rows(), settings.get_maze_columns()),
    };
    if let Some(rows) = options.rows {
        request.rows = rows;
    }
    if let Some(columns) = options.columns {
        request.columns = columns;
    }
    if options.seed.is_some() {
        request.seed = options.seed;
    }
    if request.params.get("max_retries").is_none() {
        request
            .params
            .insert("max_retries", settings.get_max_retries());
    }

    let name = options
        .generator
        .clone()
        .unwrap_or_else(|| settings.get_default_generator());
    let registry = default_generators();
    let generator = api::find_generator(&registry, &name)?;

    let response = api::generate(&request, generator.as_ref())?;
    log::info!(
        "{name}: {}x{} maze with {} walls",
        request.rows,
        request.columns,
        response.walls.len()
    );

    let render = if options.render {
        let grid = Grid::build(request.size(), &response.walls).map_err(RequestError::from)?;
        Some(grid.to_string())
    } else {
        None
    };

    Ok(Output {
        response: serde_json::to_string(&response)?,
        render,
    })
}
