//! Command implementations for scorecard

pub mod compare;
mod console;
pub mod dispatch;
pub mod evaluate;
pub mod rubric;
