//! Domain types for each tool, with their pure calculations.

pub mod diet;
pub mod exercise;
pub mod health;
pub mod hospital;
pub mod meal_plan;
pub mod medicine;
pub mod nutrition;
pub mod user;
pub mod water;
