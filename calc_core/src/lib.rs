//! # calc_core - Construction Cost Calculation Engine
//!
//! `calc_core` is the computational heart of BuildCalc: a catalog of trade
//! calculators (concrete, drywall, paint, ...) built on a shared formula
//! library, and a generic engine that reads a form, validates it, runs the
//! formulas and formats the results. All inputs and outputs are
//! JSON-serializable, so any host (terminal, web page, desktop) can drive it.
//!
//! ## Design Philosophy
//!
//! - **Pure formulas**: Deterministic functions, no I/O, no rounding beyond
//!   whole purchase units
//! - **Declarative calculators**: Each trade declares its fields and result
//!   rows; the engine does the rest
//! - **Contained failures**: Validation errors, "cannot compute" results and
//!   misbehaving calculators all end up as engine states
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::engine::{CalculatorEngine, EngineState, FormData, Formatter};
//! use calc_core::registry::get_calculator;
//!
//! let concrete = get_calculator("concrete").unwrap().load();
//! let mut engine = CalculatorEngine::new(concrete, Formatter::default());
//!
//! let form: FormData = [("length", "20"), ("width", "12"), ("thickness", "4")]
//!     .into_iter()
//!     .collect();
//!
//! if let EngineState::Computed { rows, .. } = engine.calculate(&form) {
//!     assert_eq!(rows[1].display, "3.56 yd³");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - Pure quantity and cost formulas, plus formula metadata
//! - [`calculators`] - One module per trade, and the module trait
//! - [`registry`] - Calculator ids, catalog, and lookup
//! - [`engine`] - Form reading, validation, state machine, formatting
//! - [`search`] - Keyword search over the catalog
//! - [`preferences`] - Settings and inputs remembered between sessions
//! - [`file_io`] - Preferences files with atomic saves
//! - [`config`] - Layered host configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculators;
pub mod config;
pub mod engine;
pub mod errors;
pub mod file_io;
pub mod formulas;
pub mod preferences;
pub mod registry;
pub mod search;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculators::{CalculatorMeta, CalculatorModule, ROM_DISCLAIMER};
pub use config::{ConfigLoader, Settings};
pub use engine::{CalculatorEngine, EngineState, FormData, Formatter, InputValues};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_or_default, load_preferences, save_preferences};
pub use preferences::Preferences;
pub use registry::{all_calculator_meta, get_calculator, CalculatorId, REGISTRY};
