//! In-memory class diagram: records, links and the session that owns them

mod records;
mod session;

pub use records::*;
pub use session::*;
