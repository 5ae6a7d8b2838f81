//! # TUI Components
//!
//! This module contains all UI components for the terminal editor.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that borrow everything they show:
//! - `TitleBar`: tool, target, version tier and status
//! - `SegmentList`: the segments, drawn in their own colors and styles
//! - `Inspector`: fields of the selected segment plus the events
//! - `Preview`: the generated command
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line field editor
//! - `HistoryBrowser`: overlay listing recorded commands
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props (struct fields), never by
//! reaching into `App`. `ui.rs` builds them from state each frame.
//!
//! ```rust,ignore
//! SegmentList::new(&app.segments, app.selected, dimmed).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── segment_list.rs     (Styled segment rows)
//! ├── inspector.rs        (Selected segment fields)
//! ├── preview.rs          (Generated command)
//! ├── history_browser.rs  (Ctrl+O overlay)
//! └── input_box.rs        (Field editor)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod history_browser;
pub mod input_box;
pub mod inspector;
pub mod preview;
pub mod segment_list;
pub use history_browser::{HistoryBrowser, HistoryBrowserState, HistoryEvent};
pub use input_box::{EditField, InputBox, InputEvent};
pub use inspector::Inspector;
pub use preview::Preview;
pub use segment_list::SegmentList;
