pub mod cache;
pub mod invoker;
pub mod lookup;
pub mod parser;

use std::sync::Arc;

pub use invoker::{GitInvoker, SystemGit};
pub use lookup::BlameService;

/// Service handle shared across route handlers.
pub type SharedService = Arc<BlameService<SystemGit>>;
