//! Request and response contracts, independent of the transport carrying them.

use std::sync::Arc;

use rand::{Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    algorithms::{GenerationError, GeneratorRegistry, MazeGenerator, Params, Random},
    dims::Dims,
    grid::{Grid, GridError},
    search::{SearchError, Strategy},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("cell {0:?} lies outside of the grid")]
    OutOfBounds(Dims),
    #[error("cell {0:?} is a wall")]
    OnWall(Dims),
    #[error("unsupported search strategy '{0}'")]
    UnsupportedStrategy(String),
    #[error("unsupported maze generator '{0}'")]
    UnsupportedGenerator(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<GridError> for RequestError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfBounds(pos) => RequestError::OutOfBounds(pos),
            GridError::InvalidSize(_) => RequestError::MalformedInput(err.to_string()),
        }
    }
}

impl From<SearchError> for RequestError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::OutOfBounds(pos) => RequestError::OutOfBounds(pos),
            SearchError::OnWall(pos) => RequestError::OnWall(pos),
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::MalformedInput(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRequest {
    #[serde(rename = "start-cell")]
    pub start: Dims,
    #[serde(rename = "end-cell")]
    pub end: Dims,
    #[serde(default)]
    pub walls: Vec<Dims>,
    pub rows: i32,
    pub columns: i32,
}

impl PathRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size(&self) -> Dims {
        Dims(self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResponse {
    pub solution: Vec<Dims>,
    pub steps: Vec<Dims>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRequest {
    pub rows: i32,
    pub columns: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Generator specific parameters, unknown keys are ignored.
    #[serde(default)]
    pub params: Params,
}

impl MazeRequest {
    pub fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            seed: None,
            params: Params::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size(&self) -> Dims {
        Dims(self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeResponse {
    pub walls: Vec<Dims>,
}

/// Largest grid a request may ask for.
pub const MAX_CELLS: usize = 1 << 24;

fn validate_size(size: Dims) -> Result<(), RequestError> {
    if !size.all_positive() {
        return Err(RequestError::MalformedInput(format!(
            "rows and columns must be positive, got {}x{}",
            size.0, size.1
        )));
    }

    match (size.0 as usize).checked_mul(size.1 as usize) {
        Some(cells) if cells <= MAX_CELLS => Ok(()),
        _ => Err(RequestError::MalformedInput(format!(
            "{}x{} grid exceeds the limit of {MAX_CELLS} cells",
            size.0, size.1
        ))),
    }
}

/// Parses a strategy selector, see [`Strategy`]'s `FromStr` for the accepted names.
pub fn parse_strategy(name: &str) -> Result<Strategy, RequestError> {
    name.parse()
        .map_err(|_| RequestError::UnsupportedStrategy(name.to_string()))
}

pub fn find_generator(
    registry: &GeneratorRegistry,
    name: &str,
) -> Result<Arc<dyn MazeGenerator>, RequestError> {
    registry
        .get(name)
        .ok_or_else(|| RequestError::UnsupportedGenerator(name.to_string()))
}

/// Builds the grid of the request and searches it.
pub fn solve(request: &PathRequest, strategy: Strategy) -> Result<PathResponse, RequestError> {
    validate_size(request.size())?;

    let grid = Grid::build(request.size(), &request.walls)?;
    let result = strategy.solve(&grid, request.start, request.end)?;
    if !result.is_found() {
        log::debug!("{:?} is unreachable from {:?}", request.end, request.start);
    }

    Ok(PathResponse {
        solution: result.path,
        steps: result.visited,
    })
}

/// Generates a maze of the requested size.
///
/// Without a seed in the request a fresh one is drawn, it is logged so the maze can be reproduced.
pub fn generate(
    request: &MazeRequest,
    generator: &dyn MazeGenerator,
) -> Result<MazeResponse, RequestError> {
    validate_size(request.size())?;

    let seed = request.seed.unwrap_or_else(|| {
        let seed = rand::thread_rng().gen();
        log::debug!("no seed requested, using {seed}");
        seed
    });
    let mut rng = Random::seed_from_u64(seed);

    let walls = generator.generate(request.size(), &mut rng, &request.params)?;
    log::debug!(
        "{generator:?} generated {}x{} maze with {} walls (seed {seed})",
        request.rows,
        request.columns,
        walls.len()
    );

    Ok(MazeResponse { walls })
}
