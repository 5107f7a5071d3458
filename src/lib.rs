//! Relativistic kinematics: Lorentz factor, time dilation, length contraction
//! and mass-energy for a velocity given as a fraction of c.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod relativity;
pub mod tui;

pub use error::CalcError;
pub use relativity::special::{
    C, DerivedQuantities, PhysicalParams, VelocityFraction, add_velocities, calculate,
};
