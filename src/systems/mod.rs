//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod answers;
pub mod components;
pub mod formatting;
pub mod input;
pub mod movement;
pub mod npc;
pub mod render;
pub mod spawn;
pub mod state;
