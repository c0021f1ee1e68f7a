//! Configuration management for the crossword solver

pub mod settings;

pub use settings::{
    PropagationConfig, SearchConfig, Settings, SettingsOverrides, ValueOrdering, VariableOrdering,
};
