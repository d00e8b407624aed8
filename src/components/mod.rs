//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod note_card;
mod pagination_bar;
mod sidebar;
mod sign_in;
mod sign_up;
mod sticky_wall;
mod task_board;
mod task_form;
mod task_item;

pub use delete_confirm_button::DeleteConfirmButton;
pub use note_card::NoteCard;
pub use pagination_bar::PaginationBar;
pub use sidebar::Sidebar;
pub use sign_in::SignIn;
pub use sign_up::SignUp;
pub use sticky_wall::StickyWall;
pub use task_board::TaskBoard;
pub use task_form::TaskForm;
pub use task_item::TaskItem;
