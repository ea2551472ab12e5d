pub mod script_ops;
pub mod task_ops;
pub mod template;
pub mod view;
