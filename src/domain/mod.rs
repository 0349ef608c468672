// Domain layer: the car record, the feature-space types and the ports the
// loaded artifacts implement.

pub mod model;
pub mod ports;
