pub mod api;
#[cfg(feature = "clipboard")]
pub mod clipboard;
pub mod console;
pub mod dropdown;
pub mod error;
pub mod feedback;
pub mod model;
pub mod settings;
pub mod state;
pub mod verbose;
pub mod view;

pub use api::{HttpBackend, RecordingsBackend, get_http_client};
#[cfg(feature = "clipboard")]
pub use clipboard::copy_to_clipboard;
pub use console::{Action, Console, PendingDetail, PendingList, RowTarget, Surface, UploadForm};
pub use dropdown::{Dropdown, DropdownKind, DropdownSet};
pub use error::{ConsoleError, Result};
pub use feedback::{CopyFeedback, CopyTarget};
pub use model::{Recording, RecordingId, UploadFile};
pub use settings::Settings;
pub use state::{FilterState, ListQuery, PageCursor};
pub use verbose::set_verbose;
pub use view::{ListView, Pagination, RecordingRow, TranscriptView, View, ViewPatch};
