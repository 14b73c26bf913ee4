mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{available_months_key, available_years_key, month_record_key, year_record_key};
pub use serialization::{
    deserialize_month_record, deserialize_months, deserialize_year_record, deserialize_years,
    serialize_month_record, serialize_months, serialize_year_record, serialize_years,
    SerializationError,
};
pub use traits::Cache;
