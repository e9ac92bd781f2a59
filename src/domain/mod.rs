//! Domain layer - core data types shared across the engine

pub mod model;
