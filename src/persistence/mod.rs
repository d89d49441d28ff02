pub mod files;
pub mod metadata;
pub mod task_store;

pub use files::{
    atomic_write, config_file, ensure_data_dir, init_local_dir, log_file, meta_file,
    read_optional, tasks_file,
};
pub use metadata::{load_metadata_or_default, save_metadata, AppMetadata};
pub use task_store::{load_tasks, save_tasks};
