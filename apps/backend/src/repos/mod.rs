pub mod categories;
pub mod complaint_filter;
pub mod complaints;
pub mod users;
