#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

mod macros;

pub mod config;
pub mod constants;
pub mod crossover;
pub mod error;
pub mod genome;
pub mod individual;
pub mod mutation;
pub mod network;
pub mod persist;
pub mod population;
pub mod random;
pub mod scenario;
pub mod selection;

pub use config::{SurvivalCurve, TrainingParameters};
pub use error::{ConfigError, NetworkError, PersistError, PopulationError};
pub use genome::{Genome, LayerSpec, Topology};
pub use individual::{AgentBody, Individual};
pub use mutation::{MutationParams, Schedule, ScheduleEntry};
pub use network::{activate, ActivationKind, Network, WeightInit};
pub use persist::Persist;
pub use population::{GenerationStats, Population};
pub use random::{Chance, WyRng};
pub use scenario::{EvolutionTarget, FitnessHistory, Scenario};
