// Domain layer: result model and ports (interfaces). No HTTP or CLI types here.

pub mod locale;
pub mod model;
pub mod ports;
