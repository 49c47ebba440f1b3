pub mod link_table;
pub mod search;
pub mod task_board;
