//! Raw input sources.
//!
//! A [`Source`] hands the merger an ordered list of dotted-path/value pairs;
//! where those pairs come from (an in-memory map, the environment, a TOML
//! file) is the source's business. Sources do not judge paths — the merger
//! rejects unknown ones against the schema.

use crate::error::Result;

pub mod env;
pub mod map;
pub mod toml;

pub use self::env::EnvSource;
pub use self::map::MapSource;
pub use self::toml::TomlSource;

pub trait Source {
    /// Returns the name of this source for diagnostics. Error messages and
    /// log events carry it so an operator can tell which input was at fault.
    fn name(&self) -> &str;

    /// Produces the raw dotted-path/value pairs of this source, in order.
    fn entries(&self) -> Result<Vec<(String, String)>>;
}
