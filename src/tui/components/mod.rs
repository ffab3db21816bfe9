//! # TUI Components
//!
//! Every piece of the console lives here, one file per component.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they show as struct fields:
//! - `TitleBar`: product name, operator and status line
//! - `MessageBubble`: a single chat message
//! - `Placeholder`: body of pages that are not built yet
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it each
//! frame and the state type implements `EventHandler`:
//! - `Sidebar` / `SidebarState`: page navigation
//! - `ConversationList` / `ConversationListState`: audience tabs and rows
//! - `ThreadView` / `ThreadViewState`: open thread with scrolling
//! - `InputBox`: the composer and its Send button
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs                (this file)
//! ├── title_bar.rs          (top status line)
//! ├── sidebar.rs            (page navigation)
//! ├── conversation_list.rs  (tabs + conversation rows)
//! ├── thread_view.rs        (header + scrollable bubbles)
//! ├── message.rs            (single bubble)
//! ├── placeholder.rs        (under-construction page)
//! └── input_box/            (composer)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod conversation_list;
pub mod input_box;
pub mod message;
pub mod placeholder;
pub mod sidebar;
pub mod thread_view;

pub use conversation_list::{ConversationList, ConversationListEvent, ConversationListState};
pub use input_box::{InputBox, InputEvent};
pub use placeholder::Placeholder;
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use thread_view::{ThreadView, ThreadViewState};
