mod gas_price_deserializer;
pub use gas_price_deserializer::*;
