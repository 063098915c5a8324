// Domain layer: 訂單、收件人與郵件模型，以及對外部系統的 ports。

pub mod lenient;
pub mod model;
pub mod ports;
