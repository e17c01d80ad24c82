//! Logging pipeline composition on top of a host service container.
//!
//! A composition run declares the logger and its collaborators, orders every
//! component tagged [`Role::Handler`] or [`Role::Processor`] by priority,
//! attaches both chains to the logger, injects the logger where it is wanted
//! and finally hands the log directory to the shared [`DebugFacility`]. Every
//! failure is fatal and surfaces as a [`ComposeError`]; there is no partially
//! wired logger.
//!
//! [`Role::Handler`]: pipewright_registry::Role::Handler
//! [`Role::Processor`]: pipewright_registry::Role::Processor

pub mod assembler;
pub mod config;
pub mod container;
mod debugger;
mod error;
pub mod extension;
pub mod finalizer;
mod level;
pub mod log_dir;
mod params;
pub mod plan;
pub mod schema;

pub use assembler::{LoggerBinding, assemble, assemble_claiming};
pub use config::{ComponentEntry, FactorySpec, LoggingConfig};
pub use container::{Arg, BuiltinKind, Capabilities, ContainerBuilder, Definition, Factory, ResolveError, Setup};
pub use debugger::DebugFacility;
pub use error::{ComposeError, ConfigError, Result};
pub use extension::{Composition, LoggingExtension};
pub use finalizer::Finalization;
pub use level::Level;
pub use log_dir::{LogDirSource, LogDirState, ResolvedLogDirectory};
pub use params::Parameters;
pub use plan::CompositionPlan;
