//! Semantic version inference from git branch topology, plus release branch
//! migration and retirement for build servers.

pub mod args;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod environment;
pub mod error;
pub mod git;
pub mod migration;
pub mod resolver;
pub mod retire;
pub mod ui;

pub use error::{AutoVersionError, Result};
