//! Interface to the remote git forge hosting the repository.
//!
//! Provides basic-auth file reads, branch creation, single commit uploads
//! and pull request creation through a common trait.

/// Configuration and authentication for the forge.
pub mod config;

/// Bitbucket Cloud REST API client implementation.
pub mod bitbucket;

/// Wraps a forge implementation with manifest handling and dry-run support.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
