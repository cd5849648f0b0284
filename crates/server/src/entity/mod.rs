pub mod admin;
pub mod answer;
pub mod level;
pub mod question;
pub mod user;
