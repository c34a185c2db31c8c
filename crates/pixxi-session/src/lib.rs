//! Operation table, dispatch and typed command surface for Pixxi display modules.
//!
//! This is the "just works" layer. Open a [`Session`] over any
//! [`Transport`](pixxi_transport::Transport), then either call the typed
//! methods (`session.gfx_circle(..)`, `session.file_open(..)`) or dispatch
//! by name through the [`OperationTable`].
//!
//! Every call is one blocking exchange. Failures come back as
//! [`SessionError`]; the last protocol failure also stays readable through
//! [`Session::last_error`] and is pushed to an optional observer.

pub mod api;
pub mod compound;
pub mod config;
pub mod error;
pub mod ops;
pub mod session;
pub mod table;

pub use compound::WidgetAlloc;
pub use config::{SessionConfig, DEFAULT_TIMEOUT};
pub use error::{Result, SessionError};
pub use ops::{Arg, ArgShape, OpDescriptor, ReplySpec};
pub use pixxi_frame::{ErrorKind, ErrorObserver, ErrorState, Reply};
pub use session::Session;
pub use table::{Op, OpcodeOverrides, OperationTable};
