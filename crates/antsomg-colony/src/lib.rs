//! Colony driver: many ants walking several independent graph dimensions.
//!
//! Every ant holds one position per dimension (a [`Trace`]). A navigation
//! cycle moves each unfinished ant once in every graph, tests the [`Aim`],
//! and then evaporates all trails exactly once.

pub mod aim;
pub mod ant;
pub mod colony;

pub use aim::{Aim, ReturnToStart, StepLimit};
pub use ant::{Ant, Trace};
pub use colony::{Colony, ColonyReport};
