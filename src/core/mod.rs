//! Expression engine.
//!
//! Pure functions that turn the tokens of a `pdc` invocation into a resolved
//! time object description. Nothing here performs I/O; the current time is
//! always passed in.

pub mod chunk;
pub mod counter;
pub mod datetime;
mod error;
pub mod expression;

pub use chunk::{is_time_chunk, parse_time_chunk, sum_time_chunks};
pub use counter::{parse_counter, CounterOperation, Operand, Operator, Target};
pub use datetime::parse_datetime;
pub use error::{DateTimeError, DateTimeField, ParseError};
pub use expression::{classify, Expression};
