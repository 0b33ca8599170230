//! Behavioural step modules registered with `rstest-bdd`.

pub mod frame_steps;
pub mod resolution_steps;
