//! Template engine adapter.
//!
//! - `interface`: the [`TemplateEngine`] trait and its [`EngineConfig`]
//! - `minijinja`: the MiniJinja implementation
//! - `filters`: filters registered on every engine

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use interface::{EngineConfig, TemplateEngine};
pub use self::minijinja::MiniJinjaEngine;

/// Returns the default template engine.
pub fn get_template_engine() -> Box<dyn TemplateEngine> {
    Box::new(MiniJinjaEngine::new())
}
