//! Command handlers module.
//!
//! One handler per menu entry. Handlers talk to the user through a
//! [`Console`](crate::cli::Console) and to the catalog through a
//! [`CatalogService`](crate::services::CatalogService).

mod catalog;

pub use catalog::{
    cmd_add, cmd_delete, cmd_generate_website, cmd_list, cmd_random, cmd_search, cmd_sort,
    cmd_status, cmd_update,
};
