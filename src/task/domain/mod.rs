//! Domain model for tasks, focus sessions and comments.
//!
//! All invariants live here; infrastructure concerns (storage, recurrence
//! engines) stay behind the ports in [`crate::task::ports`].

mod comment;
mod error;
mod ids;
mod location;
mod points;
mod session;
mod skip;
mod status;
mod task;

pub use comment::{Comment, CommentKind};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{CommentId, SessionId, TaskId};
pub use location::TaskLocation;
pub use points::{Points, TagPoints};
pub use session::{FocusLevel, ManualSession, Session, SessionStatus};
pub use skip::SkipState;
pub use status::TaskStatus;
pub use task::{Task, TaskDraft};
