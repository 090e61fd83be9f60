//! Rocket engine parameters carried per powered body
//!
//! Only `j_relative` enters the force model; the throttle bounds travel
//! with the body for guidance-side use

#[derive(Debug, Clone)]
pub struct Engine {
    pub j_relative: f64, // effective exhaust velocity, m/s
    pub flow_max: f64, // throttle upper bound, kg/s
    pub flow_min: f64, // throttle lower bound, kg/s
}
