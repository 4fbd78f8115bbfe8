mod toast_stack;
pub use toast_stack::{toast_region, ToastMsg, ToastStack};
