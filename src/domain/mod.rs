// Domain layer: layoff records, the unified table and the ports the core talks through.

pub mod model;
pub mod ports;
