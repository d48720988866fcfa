use crate::charset::CharClass;
use crate::random::{KeystreamSource, RandomSource};
use crate::strength::{StrengthLevel, classify};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

/// Upper bound on candidates sampled while enforcing complexity.
pub const MAX_ATTEMPTS: usize = 100;

pub const DEFAULT_LENGTH: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("At least one character type must be selected after exclusions.")]
    EmptyCharset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub length: usize,
    pub use_letters: bool,
    pub use_digits: bool,
    pub use_symbols: bool,
    pub enforce_complexity: bool,
    pub excluded_chars: BTreeSet<char>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            use_letters: true,
            use_digits: true,
            use_symbols: true,
            enforce_complexity: false,
            excluded_chars: BTreeSet::new(),
        }
    }
}

impl GenerationConfig {
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn letters(mut self, enabled: bool) -> Self {
        self.use_letters = enabled;
        self
    }

    pub fn digits(mut self, enabled: bool) -> Self {
        self.use_digits = enabled;
        self
    }

    pub fn symbols(mut self, enabled: bool) -> Self {
        self.use_symbols = enabled;
        self
    }

    pub fn enforce_complexity(mut self, enabled: bool) -> Self {
        self.enforce_complexity = enabled;
        self
    }

    pub fn exclude(mut self, chars: &str) -> Self {
        self.excluded_chars.extend(chars.chars());
        self
    }

    /// Classes contributed by the enabled flags, in sampling order.
    pub fn enabled_classes(&self) -> Vec<CharClass> {
        let mut classes = Vec::with_capacity(4);
        if self.use_letters {
            classes.push(CharClass::Uppercase);
            classes.push(CharClass::Lowercase);
        }
        if self.use_digits {
            classes.push(CharClass::Digit);
        }
        if self.use_symbols {
            classes.push(CharClass::Symbol);
        }
        classes
    }

    /// Characters eligible for sampling: enabled alphabets minus exclusions.
    pub fn universe(&self) -> Vec<char> {
        self.enabled_classes()
            .into_iter()
            .flat_map(|class| class.alphabet().chars())
            .filter(|c| !self.excluded_chars.contains(c))
            .collect()
    }

    /// Enabled classes with at least one character left after exclusion.
    pub fn satisfiable_classes(&self) -> Vec<CharClass> {
        self.enabled_classes()
            .into_iter()
            .filter(|class| {
                class
                    .alphabet()
                    .chars()
                    .any(|c| !self.excluded_chars.contains(&c))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    NotRequested,
    Met,
    Shortfall,
}

pub struct Password {
    value: Zeroizing<String>,
    attempts: usize,
    coverage: Coverage,
}

impl Password {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Number of candidates sampled, including the returned one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    pub fn meets_coverage(&self) -> bool {
        self.coverage != Coverage::Shortfall
    }

    pub fn strength(&self) -> StrengthLevel {
        classify(&self.value)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("value", &"<redacted>")
            .field("attempts", &self.attempts)
            .field("coverage", &self.coverage)
            .finish()
    }
}

pub fn generate<R>(config: &GenerationConfig, rng: &mut R) -> Result<Password, ConfigurationError>
where
    R: RandomSource + ?Sized,
{
    let universe = config.universe();
    if universe.is_empty() {
        return Err(ConfigurationError::EmptyCharset);
    }

    debug!(
        "sampling {} characters from a universe of {}",
        config.length,
        universe.len()
    );

    let mut candidate = sample(&universe, config.length, rng);
    let mut attempts = 1;

    if !config.enforce_complexity {
        return Ok(Password {
            value: candidate,
            attempts,
            coverage: Coverage::NotRequested,
        });
    }

    let required = config.satisfiable_classes();
    let mut covered = is_covered(&candidate, &required);

    while !covered && attempts < MAX_ATTEMPTS {
        candidate = sample(&universe, config.length, rng);
        attempts += 1;
        covered = is_covered(&candidate, &required);
    }

    let coverage = if covered {
        debug!("complexity requirements met after {} attempt(s)", attempts);
        Coverage::Met
    } else {
        warn!(
            "complexity requirements not met after {} attempts; returning best-effort password",
            attempts
        );
        Coverage::Shortfall
    };

    Ok(Password {
        value: candidate,
        attempts,
        coverage,
    })
}

/// Generates with a freshly seeded keystream from the operating system.
pub fn generate_password(config: &GenerationConfig) -> Result<Password, ConfigurationError> {
    let mut rng = KeystreamSource::from_entropy();
    generate(config, &mut rng)
}

fn sample<R>(universe: &[char], length: usize, rng: &mut R) -> Zeroizing<String>
where
    R: RandomSource + ?Sized,
{
    let mut password = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        password.push(universe[rng.next_index(universe.len())]);
    }
    password
}

fn is_covered(candidate: &str, required: &[CharClass]) -> bool {
    required
        .iter()
        .all(|class| candidate.chars().any(|c| class.contains(c)))
}
