pub mod charset;
pub mod generator;
pub mod random;
pub mod strength;
pub mod ui;

pub use charset::CharClass;
pub use generator::{
    ConfigurationError, Coverage, GenerationConfig, MAX_ATTEMPTS, Password, generate,
    generate_password,
};
pub use random::{KeystreamSource, RandomSource};
pub use strength::{StrengthLevel, classify, score};
