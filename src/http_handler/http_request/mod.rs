use super::http_response::{post_order, task_blocks};

pub mod post_order_post;
pub mod request_common;
pub mod task_blocks_post;
