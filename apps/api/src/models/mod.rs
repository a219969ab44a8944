pub mod assessment;
pub mod course;
pub mod recommendation;
pub mod user;
