pub mod compare;
pub mod evaluate;
pub mod logging;
pub mod misc;
pub mod rubric;
pub mod support;
