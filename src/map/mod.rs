//! This module defines the maze grids and provides functions for interacting with them.

pub mod direction;
pub mod grid;
pub mod layout;
