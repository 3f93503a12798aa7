//! Widgets for the dashboard and assistant panel

pub mod checklist;
pub mod input_box;
pub mod markdown;
pub mod progress;
pub mod spinner;
pub mod turn_list;

pub use checklist::{ChecklistItem, ChecklistSection, ChecklistView};
pub use input_box::InputBox;
pub use progress::{ProgressGauge, SectionBar, SectionChart};
pub use spinner::Spinner;
pub use turn_list::TurnList;
