// Domain layer: vehicles, customers and the notification port. No I/O here.

pub mod model;
pub mod ports;
