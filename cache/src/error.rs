use thiserror::Error;

/// Errors that can occur when configuring or building a memory cache.
///
/// Cache operations themselves never fail: misses are `None`, and eviction
/// shortfalls are reported as partial counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  /// Every region must be addressable by a non-empty name.
  #[error("region name cannot be empty")]
  EmptyRegionName,
  /// The spool chunk size must be at least 1, otherwise overflow never drains.
  #[error("spool chunk size for region '{0}' must be at least 1")]
  ZeroChunkSize(String),
  /// The concurrent map needs at least one shard.
  #[error("shard count for region '{0}' cannot be zero")]
  ZeroShards(String),
  /// The policy name did not match any built-in policy.
  #[error("unknown memory cache policy '{0}', expected one of lru, fifo, lifo, mru")]
  UnknownPolicy(String),
  /// A configuration document could not be parsed.
  #[error("failed to parse region configuration: {0}")]
  Parse(String),
}
