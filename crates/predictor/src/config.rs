//! Configuration system for the branch predictors.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the predictors. It provides:
//! 1. **Defaults:** Baseline table widths and perceptron constants for each strategy.
//! 2. **Structures:** One config section per strategy, gathered under [`Config`].
//! 3. **Enums:** The [`BranchPredictor`] strategy selector.
//! 4. **Validation:** Range checks run before any table is allocated.
//!
//! Configuration is supplied as JSON by the trace driver, or use `Config::default()`.

use std::fmt;

use serde::Deserialize;

use crate::common::{ConfigError, MAX_PERCEPTRON_HISTORY, MAX_TABLE_BITS};

/// Default configuration constants for the predictors.
///
/// These values define the baseline predictor geometry when not explicitly
/// overridden in the JSON configuration.
mod defaults {
    /// Gshare global history / BHT index width (128 Ki counters).
    pub const GSHARE_GHISTORY_BITS: usize = 17;

    /// Tournament global BHT index width.
    pub const TOURNAMENT_GHISTORY_BITS: usize = 17;

    /// Tournament local BHT and local history register index width.
    pub const TOURNAMENT_LHISTORY_BITS: usize = 17;

    /// Tournament selector table index width.
    pub const TOURNAMENT_CHOOSER_BITS: usize = 17;

    /// Custom hybrid global BHT index width.
    pub const CUSTOM_GHISTORY_BITS: usize = 13;

    /// Custom hybrid local BHT index width.
    pub const CUSTOM_LHISTORY_BITS: usize = 12;

    /// Custom hybrid selector table index width.
    pub const CUSTOM_CHOOSER_BITS: usize = 13;

    /// Number of perceptron rows in the custom hybrid.
    pub const PERCEPTRON_COUNT: usize = 256;

    /// Perceptron global history length (weights per row, excluding bias).
    pub const PERCEPTRON_HISTORY: usize = 24;

    /// Address gate compared against the low PC byte when global and local disagree.
    pub const GATE_THRESHOLD: u32 = 60;
}

/// Coefficient of the perceptron training threshold (θ = 1.93·H + 14).
pub const THETA_COEFF: f64 = 1.93;
/// Bias of the perceptron training threshold.
pub const THETA_BIAS: f64 = 14.0;

/// Branch prediction strategy.
///
/// Selected once when the predictor is built and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predicts taken. Keeps no state.
    #[default]
    Static,
    /// Global history XOR PC indexed table of 2-bit counters.
    #[serde(alias = "GShare", alias = "GSHARE")]
    Gshare,
    /// Global and local predictors arbitrated by a learned selector.
    Tournament,
    /// Tournament predictor extended with a perceptron and an address gate.
    Custom,
}

impl BranchPredictor {
    /// Maps the trace driver's integer strategy tag onto a strategy.
    ///
    /// Tags follow the driver's ordering: 0 = Static, 1 = Gshare,
    /// 2 = Tournament, 3 = Custom. Any other tag yields `None`.
    pub const fn from_raw(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Static),
            1 => Some(Self::Gshare),
            2 => Some(Self::Tournament),
            3 => Some(Self::Custom),
            _ => None,
        }
    }

    /// Human-readable strategy name as printed in driver reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Gshare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for BranchPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root configuration structure containing all predictor settings.
///
/// Only the section belonging to the selected strategy is validated and
/// used to size tables; the other sections are ignored.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use bpsim_core::config::{BranchPredictor, Config};
///
/// let config = Config::default();
/// assert_eq!(config.branch_predictor, BranchPredictor::Static);
/// assert_eq!(config.gshare.ghistory_bits, 17);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use bpsim_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "branch_predictor": "Tournament",
///     "tournament": {
///         "ghistory_bits": 9,
///         "lhistory_bits": 10,
///         "chooser_bits": 9
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.branch_predictor, BranchPredictor::Tournament);
/// assert_eq!(config.tournament.lhistory_bits, 10);
/// assert_eq!(config.custom.num_perceptrons, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Selected prediction strategy.
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// Emit a trace-level log record for every prediction and training event.
    #[serde(default)]
    pub verbose: bool,

    /// Gshare predictor configuration.
    #[serde(default)]
    pub gshare: GshareConfig,

    /// Tournament predictor configuration.
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// Custom hybrid predictor configuration.
    #[serde(default)]
    pub custom: CustomConfig,
}

impl Config {
    /// Parses a JSON configuration document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range parameters.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a default configuration with the given strategy selected.
    pub fn with_predictor(branch_predictor: BranchPredictor) -> Self {
        Self {
            branch_predictor,
            ..Self::default()
        }
    }

    /// Checks the section of the selected strategy.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.branch_predictor {
            BranchPredictor::Static => Ok(()),
            BranchPredictor::Gshare => self.gshare.validate(),
            BranchPredictor::Tournament => self.tournament.validate(),
            BranchPredictor::Custom => self.custom.validate(),
        }
    }
}

/// Rejects table widths that are empty or too large to allocate.
fn check_table_bits(field: &'static str, bits: usize) -> Result<(), ConfigError> {
    if (1..=MAX_TABLE_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(ConfigError::TableBits { field, bits })
    }
}

/// Gshare predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GshareConfig {
    /// Global history bits used to index the BHT (log2 of table size).
    #[serde(default = "GshareConfig::default_ghistory_bits")]
    pub ghistory_bits: usize,
}

impl GshareConfig {
    /// Returns the default gshare index width.
    fn default_ghistory_bits() -> usize {
        defaults::GSHARE_GHISTORY_BITS
    }

    /// Checks the table width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableBits`] if the width is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("gshare.ghistory_bits", self.ghistory_bits)
    }
}

impl Default for GshareConfig {
    fn default() -> Self {
        Self {
            ghistory_bits: defaults::GSHARE_GHISTORY_BITS,
        }
    }
}

/// Tournament predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentConfig {
    /// Global BHT size (log2)
    #[serde(default = "TournamentConfig::default_ghistory_bits")]
    pub ghistory_bits: usize,

    /// Local BHT and local history register table size (log2)
    #[serde(default = "TournamentConfig::default_lhistory_bits")]
    pub lhistory_bits: usize,

    /// Selector table size (log2)
    #[serde(default = "TournamentConfig::default_chooser_bits")]
    pub chooser_bits: usize,
}

impl TournamentConfig {
    /// Returns the default tournament global BHT width.
    fn default_ghistory_bits() -> usize {
        defaults::TOURNAMENT_GHISTORY_BITS
    }

    /// Returns the default tournament local table width.
    fn default_lhistory_bits() -> usize {
        defaults::TOURNAMENT_LHISTORY_BITS
    }

    /// Returns the default tournament selector width.
    fn default_chooser_bits() -> usize {
        defaults::TOURNAMENT_CHOOSER_BITS
    }

    /// Checks all three table widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TableBits`] naming the first bad width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("tournament.ghistory_bits", self.ghistory_bits)?;
        check_table_bits("tournament.lhistory_bits", self.lhistory_bits)?;
        check_table_bits("tournament.chooser_bits", self.chooser_bits)
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            ghistory_bits: defaults::TOURNAMENT_GHISTORY_BITS,
            lhistory_bits: defaults::TOURNAMENT_LHISTORY_BITS,
            chooser_bits: defaults::TOURNAMENT_CHOOSER_BITS,
        }
    }
}

/// Custom hybrid (tournament + perceptron) predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomConfig {
    /// Global BHT size (log2)
    #[serde(default = "CustomConfig::default_ghistory_bits")]
    pub ghistory_bits: usize,

    /// Local BHT size (log2)
    #[serde(default = "CustomConfig::default_lhistory_bits")]
    pub lhistory_bits: usize,

    /// Selector table size (log2)
    #[serde(default = "CustomConfig::default_chooser_bits")]
    pub chooser_bits: usize,

    /// Number of perceptron rows (need not be a power of two)
    #[serde(default = "CustomConfig::default_num_perceptrons")]
    pub num_perceptrons: usize,

    /// Perceptron history length in bits
    #[serde(default = "CustomConfig::default_history_length")]
    pub history_length: usize,

    /// Perceptron training threshold; derived from the history length when absent
    #[serde(default)]
    pub threshold: Option<i32>,

    /// Low PC byte above which disagreeing components are blended
    #[serde(default = "CustomConfig::default_gate_threshold")]
    pub gate_threshold: u32,
}

impl CustomConfig {
    /// Returns the default custom global BHT width.
    fn default_ghistory_bits() -> usize {
        defaults::CUSTOM_GHISTORY_BITS
    }

    /// Returns the default custom local table width.
    fn default_lhistory_bits() -> usize {
        defaults::CUSTOM_LHISTORY_BITS
    }

    /// Returns the default custom selector width.
    fn default_chooser_bits() -> usize {
        defaults::CUSTOM_CHOOSER_BITS
    }

    /// Returns the default perceptron row count.
    fn default_num_perceptrons() -> usize {
        defaults::PERCEPTRON_COUNT
    }

    /// Returns the default perceptron history length.
    fn default_history_length() -> usize {
        defaults::PERCEPTRON_HISTORY
    }

    /// Returns the default address gate.
    fn default_gate_threshold() -> u32 {
        defaults::GATE_THRESHOLD
    }

    /// Training threshold θ actually used by the perceptron.
    ///
    /// An explicit `threshold` wins; otherwise θ = ⌊1.93·H + 14⌋.
    pub fn effective_threshold(&self) -> i32 {
        self.threshold.unwrap_or_else(|| {
            (THETA_COEFF * (self.history_length as f64) + THETA_BIAS) as i32
        })
    }

    /// Checks table widths and perceptron parameters.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_table_bits("custom.ghistory_bits", self.ghistory_bits)?;
        check_table_bits("custom.lhistory_bits", self.lhistory_bits)?;
        check_table_bits("custom.chooser_bits", self.chooser_bits)?;

        if self.num_perceptrons == 0 {
            return Err(ConfigError::NoPerceptrons);
        }
        if !(1..=MAX_PERCEPTRON_HISTORY).contains(&self.history_length) {
            return Err(ConfigError::PerceptronHistory(self.history_length));
        }
        if let Some(theta) = self.threshold.filter(|theta| *theta < 0) {
            return Err(ConfigError::NegativeThreshold(theta));
        }
        if self.gate_threshold > 0xFF {
            return Err(ConfigError::GateThreshold(self.gate_threshold));
        }
        Ok(())
    }
}

impl Default for CustomConfig {
    fn default() -> Self {
        Self {
            ghistory_bits: defaults::CUSTOM_GHISTORY_BITS,
            lhistory_bits: defaults::CUSTOM_LHISTORY_BITS,
            chooser_bits: defaults::CUSTOM_CHOOSER_BITS,
            num_perceptrons: defaults::PERCEPTRON_COUNT,
            history_length: defaults::PERCEPTRON_HISTORY,
            threshold: None,
            gate_threshold: defaults::GATE_THRESHOLD,
        }
    }
}
