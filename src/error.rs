use thiserror::Error;

/// Unrecoverable failures raised by the simulation.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("memory allocation failed while growing the snake body to {requested} segments")]
    ResourceExhaustion { requested: usize },
}

/// Placement failure when the interior has no acceptable free cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("no free cell found after {attempts} attempts")]
    Saturated { attempts: u32 },
}
