pub(crate) mod response_common;
pub mod post_order;
pub mod task_blocks;
