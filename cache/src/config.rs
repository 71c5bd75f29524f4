use crate::error::ConfigError;
use crate::policy::PolicyKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum number of resident elements per region.
pub const DEFAULT_MAX_OBJECTS: usize = 100;

/// Default number of elements spooled per overflow batch.
pub const DEFAULT_SPOOL_CHUNK_SIZE: usize = 2;

/// The configuration of one cache region, as handed to its memory cache.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionConfig {
  /// The region name. Used in every log line and in statistics.
  pub name: String,
  /// Maximum number of resident elements before overflow spooling starts.
  pub max_objects: usize,
  /// Number of elements spooled per batch once `max_objects` is exceeded.
  pub spool_chunk_size: usize,
  /// The eviction policy.
  pub policy: PolicyKind,
  /// Shard count of the key map. `None` derives it from the CPU count.
  pub shards: Option<usize>,
  /// Runs the map/list consistency pass after every mutation. Expensive;
  /// meant for debugging and tests.
  pub verify_consistency: bool,
}

impl Default for RegionConfig {
  fn default() -> Self {
    Self {
      name: String::new(),
      max_objects: DEFAULT_MAX_OBJECTS,
      spool_chunk_size: DEFAULT_SPOOL_CHUNK_SIZE,
      policy: PolicyKind::default(),
      shards: None,
      verify_consistency: false,
    }
  }
}

impl RegionConfig {
  /// Creates a configuration with default limits for the named region.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Sets the maximum number of resident elements.
  pub fn max_objects(mut self, max_objects: usize) -> Self {
    self.max_objects = max_objects;
    self
  }

  /// Sets the number of elements spooled per overflow batch.
  pub fn spool_chunk_size(mut self, chunk_size: usize) -> Self {
    self.spool_chunk_size = chunk_size;
    self
  }

  pub fn policy(mut self, policy: PolicyKind) -> Self {
    self.policy = policy;
    self
  }

  pub fn shards(mut self, shards: usize) -> Self {
    self.shards = Some(shards);
    self
  }

  pub fn verify_consistency(mut self, enabled: bool) -> Self {
    self.verify_consistency = enabled;
    self
  }

  /// Checks the configuration for values the memory cache cannot work with.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.name.trim().is_empty() {
      return Err(ConfigError::EmptyRegionName);
    }
    if self.spool_chunk_size == 0 {
      return Err(ConfigError::ZeroChunkSize(self.name.clone()));
    }
    if self.shards == Some(0) {
      return Err(ConfigError::ZeroShards(self.name.clone()));
    }
    Ok(())
  }

  /// The shard count to use, rounded up to a power of two.
  pub(crate) fn resolved_shards(&self) -> usize {
    self
      .shards
      .unwrap_or_else(|| num_cpus::get() * 4)
      .max(1)
      .next_power_of_two()
  }

  /// Parses and validates a region configuration from YAML.
  ///
  /// Omitted fields take their defaults:
  ///
  /// ```yaml
  /// name: tiles
  /// max_objects: 500
  /// spool_chunk_size: 10
  /// policy: fifo
  /// ```
  #[cfg(feature = "serde")]
  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    let config: RegionConfig =
      serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }
}
